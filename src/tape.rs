use crate::{
    data::{InteractionData, RequestData, ResponseData},
    error::Error,
    fixture_manager::FixtureManager,
    handler::RequestHandler,
    header_filter,
    interaction_manager::InteractionManager,
    json_compare::{self, CompareMode},
    url_pattern::UrlPatternMatcher,
};
use log::{debug, info};
use serde_json::Value;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TapeMode {
    Playback,
    Record,
}

/// One tape is bound to one fixture and one test scope. It either replays the
/// fixture's interactions in order, or captures real traffic for persistence
/// at `close`. The mode is decided when the fixture is first loaded: a missing
/// or empty fixture means `Record`, anything else means `Playback`.
#[derive(Debug)]
pub struct HttpTape {
    url_pattern: UrlPatternMatcher,
    compare_mode: CompareMode,
    manager: Arc<dyn InteractionManager + Send + Sync>,
    state: Mutex<TapeState>,
}

#[derive(Debug)]
struct TapeState {
    variables: HashMap<String, Value>,
    generation: u64,
    expected: Option<LoadedFixture>,
    mode: Option<TapeMode>,
    captured: Vec<InteractionData>,
    index: usize,
}

#[derive(Debug)]
struct LoadedFixture {
    interactions: Vec<InteractionData>,
    generation: u64,
}

impl HttpTape {
    pub fn new<M>(url_pattern: &str, manager: M) -> Result<Self, Error>
    where
        M: InteractionManager + Send + Sync + 'static,
    {
        Self::with_compare_mode(url_pattern, manager, CompareMode::default())
    }

    pub fn with_compare_mode<M>(
        url_pattern: &str,
        manager: M,
        compare_mode: CompareMode,
    ) -> Result<Self, Error>
    where
        M: InteractionManager + Send + Sync + 'static,
    {
        Ok(Self {
            url_pattern: UrlPatternMatcher::new(url_pattern)?,
            compare_mode,
            manager: Arc::new(manager),
            state: Mutex::new(TapeState {
                variables: HashMap::new(),
                generation: 0,
                expected: None,
                mode: None,
                captured: Vec::new(),
                index: 0,
            }),
        })
    }

    pub fn for_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::new("**", FixtureManager::new(path))
    }

    /// Decides whether this tape should handle the request, without consuming
    /// it: pattern scope first, then (in playback) the same comparison
    /// `on_request` performs, with a mismatch reported as `false` instead of
    /// an error. Lets a caller pick one tape among several candidates.
    pub fn probe(&self, request: &RequestData) -> Result<bool, Error> {
        if !self.url_pattern.matches(&request.url) {
            return Ok(false);
        }

        let mut state = self.state.lock()?;
        self.ensure_loaded(&mut state)?;

        if state.mode == Some(TapeMode::Record) {
            return Ok(true);
        }

        let interactions = expected(&state);
        if state.index >= interactions.len() {
            debug!(
                "[{}] {} arrived after all {} expected interactions were consumed",
                request.method,
                request.url,
                interactions.len()
            );
            return Ok(false);
        }

        match self.match_at_cursor(&state, request) {
            Ok(_) => Ok(true),
            Err(Error::RequestMismatch(message)) => {
                debug!(
                    "request doesn't match interaction {}: {}",
                    state.index, message
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn set_variable<S, V>(&self, name: S, value: V) -> Result<(), Error>
    where
        S: Into<String>,
        V: Into<Value>,
    {
        let mut state = self.state.lock()?;
        state.variables.insert(name.into(), value.into());
        state.generation += 1;

        Ok(())
    }

    pub fn mode(&self) -> Result<Option<TapeMode>, Error> {
        let state = self.state.lock()?;
        Ok(state.mode)
    }

    /// Finalizes the scope: persists captured interactions in record mode, or
    /// fails if playback left expected interactions unconsumed.
    pub fn close(&self) -> Result<(), Error> {
        let mut state = self.state.lock()?;

        if !state.captured.is_empty() {
            self.manager
                .save_interactions(&state.captured)
                .map_err(Error::FixtureError)?;
            info!("Recorded http mocks:\n{}", urls_of(&state.captured));
            return Ok(());
        }

        self.ensure_loaded(&mut state)?;
        let interactions = expected(&state);
        if state.index < interactions.len() {
            return Err(Error::UnconsumedInteractions {
                expected: interactions.len(),
                consumed: state.index,
            });
        }

        Ok(())
    }

    fn ensure_loaded(&self, state: &mut TapeState) -> Result<(), Error> {
        let stale = match &state.expected {
            Some(fixture) => fixture.generation != state.generation,
            None => true,
        };
        if !stale {
            return Ok(());
        }

        let interactions = self
            .manager
            .load_interactions(&state.variables)
            .map_err(Error::FixtureError)?;

        // The mode is fixed by the first load; later reloads only refresh the
        // interpolated interactions.
        if state.mode.is_none() {
            state.mode = Some(if interactions.is_empty() {
                TapeMode::Record
            } else {
                TapeMode::Playback
            });
        }
        state.expected = Some(LoadedFixture {
            interactions,
            generation: state.generation,
        });

        Ok(())
    }

    fn match_at_cursor(
        &self,
        state: &TapeState,
        request: &RequestData,
    ) -> Result<ResponseData, Error> {
        let interactions = expected(state);
        let mock = match interactions.get(state.index) {
            Some(mock) => mock,
            None => {
                return Err(Error::RequestMismatch(format!(
                    "received [{}] {} but all {} expected interactions were already consumed",
                    request.method,
                    request.url,
                    interactions.len()
                )))
            }
        };

        let expected_request = serde_json::to_value(&mock.request)?;
        let actual_request = serde_json::to_value(prepare_request_for_record(request.clone()))?;
        let result = json_compare::compare_json(&expected_request, &actual_request, self.compare_mode);

        if result.failed() {
            return Err(Error::RequestMismatch(format!(
                "{}\nExpected request:\n{}\nActual request:\n{}",
                result.message(),
                pretty(&expected_request),
                pretty(&actual_request)
            )));
        }

        Ok(mock.response.clone())
    }
}

impl RequestHandler for HttpTape {
    fn on_request(&self, request: &RequestData) -> Result<Option<ResponseData>, Error> {
        let mut state = self.state.lock()?;
        self.ensure_loaded(&mut state)?;

        if state.mode == Some(TapeMode::Record) {
            return Ok(None);
        }

        info!("Playback http mock: [{}] {}", request.method, request.url);
        let response = self.match_at_cursor(&state, request)?;
        state.index += 1;

        Ok(Some(prepare_response_for_playback(response)))
    }

    fn on_response(
        &self,
        request: &RequestData,
        response: ResponseData,
    ) -> Result<ResponseData, Error> {
        let mut state = self.state.lock()?;
        state.captured.push(InteractionData {
            request: prepare_request_for_record(request.clone()),
            response: prepare_response_for_record(response.clone()),
        });

        Ok(response)
    }
}

fn expected(state: &TapeState) -> &[InteractionData] {
    state
        .expected
        .as_ref()
        .map(|fixture| fixture.interactions.as_slice())
        .unwrap_or(&[])
}

fn prepare_request_for_record(mut request: RequestData) -> RequestData {
    if request.is_json() {
        request.body = normalize_json_body(request.body);
    }
    request.headers = header_filter::filter_headers(&request.headers);
    request
}

fn prepare_response_for_record(mut response: ResponseData) -> ResponseData {
    if response.is_json() {
        response.body = normalize_json_body(response.body);
    }
    response.headers = header_filter::filter_headers(&response.headers);
    response
}

fn prepare_response_for_playback(mut response: ResponseData) -> ResponseData {
    if response.is_json() {
        if let Some(body) = response.body.take() {
            response.body = Some(match body {
                Value::String(text) => Value::String(text),
                structured => Value::String(structured.to_string()),
            });
        }
    }
    response
}

fn normalize_json_body(body: Option<Value>) -> Option<Value> {
    match body {
        Some(Value::String(text)) => match serde_json::from_str(&text) {
            Ok(parsed) => Some(parsed),
            // a json content type with an unparsable body stays raw
            Err(_) => Some(Value::String(text)),
        },
        other => other,
    }
}

fn urls_of(interactions: &[InteractionData]) -> String {
    interactions
        .iter()
        .map(|interaction| {
            format!(
                "- [{}] {}",
                interaction.request.method, interaction.request.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
