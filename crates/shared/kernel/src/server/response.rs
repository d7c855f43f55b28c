use campus_derive::api_model;

/// Plain acknowledgement for actions without a resource to return.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
