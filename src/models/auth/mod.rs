pub mod requests;
pub mod responses;

pub use requests::{ChangePasswordRequest, LoginRequest};
pub use responses::{LoginResponse, RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse};
