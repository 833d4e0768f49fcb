mod api;

pub use api::{
    ClientInfoResponse, EchoResponse, FormatJsonResponse, HashRequest, HashResponse,
    HealthResponse, JwtDecodeRequest, JwtDecodeResponse, ServerTimeResponse, UuidQuery,
    UuidResponse,
};
