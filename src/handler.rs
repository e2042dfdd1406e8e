use crate::{
    data::{RequestData, ResponseData},
    error::Error,
};

/// The boundary an http-client adapter drives. `on_request` is consulted
/// before performing a real call; a returned response must be handed to the
/// caller without touching the network. `on_response` reports a completed
/// real call and returns the response unchanged for forwarding.
pub trait RequestHandler {
    fn on_request(&self, request: &RequestData) -> Result<Option<ResponseData>, Error>;

    fn on_response(
        &self,
        request: &RequestData,
        response: ResponseData,
    ) -> Result<ResponseData, Error>;
}
