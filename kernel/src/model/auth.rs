/// Opaque bearer credential presented by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
