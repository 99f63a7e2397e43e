use crate::{
    Credentials, CurrentUserRequest, LoginResponse, PredictRequest, PredictResponse,
    RegisterRequest, RegisterResponse, UpdateProfileRequest, UserProfile,
};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

/// How the request value is written into the HTTP body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// No body is sent (GET requests).
    Empty,
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
}

impl BodyEncoding {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            BodyEncoding::Empty => None,
            BodyEncoding::Json => Some("application/json"),
            BodyEncoding::Form => Some("application/x-www-form-urlencoded"),
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, relative to the backend base URL.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Body encoding of the request value.
    const ENCODING: BodyEncoding = BodyEncoding::Json;
    /// Whether the endpoint sits behind the bearer session.
    /// A 401 from such an endpoint means the stored session is no longer valid.
    const AUTHENTICATED: bool = false;
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a bearer token
impl ApiRequest for Credentials {
    type Response = LoginResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const ENCODING: BodyEncoding = BodyEncoding::Form;
}

/// Create an account
impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Run sentiment inference on a piece of text
impl ApiRequest for PredictRequest {
    type Response = PredictResponse;
    const PATH: &'static str = "/predict";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;
}

/// Fetch the signed-in user's profile
impl ApiRequest for CurrentUserRequest {
    type Response = UserProfile;
    const PATH: &'static str = "/users/me";
    const METHOD: HttpMethod = HttpMethod::Get;
    const ENCODING: BodyEncoding = BodyEncoding::Empty;
    const AUTHENTICATED: bool = true;
}

/// Persist edits to the signed-in user's profile
impl ApiRequest for UpdateProfileRequest {
    type Response = UserProfile;
    const PATH: &'static str = "/users/me";
    const METHOD: HttpMethod = HttpMethod::Put;
    const AUTHENTICATED: bool = true;
}
