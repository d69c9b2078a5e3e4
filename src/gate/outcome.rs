/// Why a request was denied. Every reason is sent as HTTP 401; `code` lets clients
/// tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Missing `Authorization` header or not a `Bearer ` credential.
    NoToken,
    /// Access token revoked, or neither access nor refresh token is valid.
    TokenInvalid,
    /// Access token invalid but the refresh token is valid: the client should refresh.
    AccessTokenExpired,
}

impl DenyReason {
    pub fn code(self) -> u32 {
        match self {
            Self::NoToken => 2001,
            Self::TokenInvalid => 2002,
            Self::AccessTokenExpired => 2003,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NoToken => "no token was provided",
            Self::TokenInvalid => "token is not valid",
            Self::AccessTokenExpired => {
                "access token has expired, refresh it with the refresh token"
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoToken => "NO_TOKEN",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::AccessTokenExpired => "ACCESS_TOKEN_EXPIRED",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one admission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    Deny(DenyReason),
}
