/// Describes SafeEnv specific error types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing request fields.
    InvalidInput,
    /// Missing, expired or forged session, or bad credentials.
    Unauthorized,
    /// Uniqueness violation on create or rename.
    Conflict,
    /// Resource is absent or isn't owned by the caller.
    NotFound,
    /// Password reset token is unknown, already consumed or expired.
    InvalidOrExpiredToken,
    /// Stored ciphertext failed the integrity check.
    CorruptData,
    /// Unknown error.
    Unknown,
}
