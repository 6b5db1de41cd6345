/// `{"alg":"EdDSA"}`
pub const EDDSA_PROTECTED: &[u8] = br#"{"alg":"EdDSA"}"#;

/// base64url of [`EDDSA_PROTECTED`]
pub const EDDSA_PROTECTED_B64: &str = "eyJhbGciOiJFZERTQSJ9";

/// The RFC 7797 §4.2 protected header
pub const UNENCODED_PROTECTED: &[u8] = br#"{"alg":"HS256","b64":false,"crit":["b64"]}"#;

/// base64url of [`UNENCODED_PROTECTED`]
pub const UNENCODED_PROTECTED_B64: &str =
    "eyJhbGciOiJIUzI1NiIsImI2NCI6ZmFsc2UsImNyaXQiOlsiYjY0Il19";
