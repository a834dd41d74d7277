use std::io::{self, Write};

use crate::credentials::CredentialRecord;

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";

/// Render a record as shell `export` lines.
///
/// Values are written verbatim; AWS-issued keys and tokens need no quoting.
/// The expiration is never printed.
pub fn format_exports(record: &CredentialRecord) -> String {
    format!(
        "export {ACCESS_KEY_VAR}={}\nexport {SECRET_ACCESS_KEY_VAR}={}\nexport {SESSION_TOKEN_VAR}={}\n",
        record.access_key_id, record.secret_access_key, record.session_token
    )
}

pub fn write_exports<W: Write + ?Sized>(out: &mut W, record: &CredentialRecord) -> io::Result<()> {
    out.write_all(format_exports(record).as_bytes())?;
    out.flush()
}
