use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub type Headers = BTreeMap<String, String>;

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionData {
    pub request: RequestData,
    pub response: ResponseData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestData {
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: Headers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    pub protocol: String,
    pub status_code: u16,
    pub status_text: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: Headers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestData {
    pub fn is_json(&self) -> bool {
        is_json_content(&self.headers)
    }

    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(value_text)
    }
}

impl ResponseData {
    pub fn is_json(&self) -> bool {
        is_json_content(&self.headers)
    }

    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(value_text)
    }
}

fn is_json_content(headers: &Headers) -> bool {
    headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE))
        .any(|(_, value)| value.trim_start().starts_with(APPLICATION_JSON))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(entries: &[(&str, &str)]) -> Headers {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn json_content_type_detected_with_charset() {
        let request = RequestData {
            method: "POST".into(),
            url: "https://api.test/users".into(),
            headers: headers(&[("content-type", "application/json; charset=utf-8")]),
            body: None,
        };

        assert!(request.is_json());
    }

    #[test]
    fn non_json_content_type_not_detected() {
        let request = RequestData {
            method: "POST".into(),
            url: "https://api.test/users".into(),
            headers: headers(&[("content-type", "text/plain")]),
            body: None,
        };

        assert!(!request.is_json());
    }

    #[test]
    fn response_serializes_with_camel_case_fields_and_omits_absent_body() {
        let response = ResponseData {
            protocol: "HTTP/1.1".into(),
            status_code: 204,
            status_text: "No Content".into(),
            headers: Headers::new(),
            body: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({"protocol": "HTTP/1.1", "statusCode": 204, "statusText": "No Content"})
        );
    }

    #[test]
    fn structured_body_round_trips_as_native_json() {
        let text = r#"{"request":{"method":"GET","url":"https://api.test/users"},"response":{"protocol":"HTTP/1.1","statusCode":200,"statusText":"OK","body":{"id":1}}}"#;
        let interaction: InteractionData = serde_json::from_str(text).unwrap();

        assert_eq!(interaction.response.body, Some(json!({"id": 1})));
        assert_eq!(
            interaction.response.body_text(),
            Some("{\"id\":1}".to_string())
        );
    }
}
