//! Lines sent from the server to clients.
//!
//! Every builder returns the complete wire text, trailing `\n` included, so
//! callers can hand the result straight to the codec.

use chrono::Timelike;

/// First two lines of a `SVR:who` reply.
pub const WHO_HEADER: &str = "FROM SERVER\nConnected clients:\n";

/// Marker appended to the requesting client's own entry in a listing.
pub const SELF_MARKER: &str = " (YOU)";

/// Reply to a rename whose target is empty.
pub const INVALID_USERNAME: &str = "Invalid username.\n";

/// Reply to a line longer than the server accepts.
pub const INPUT_TOO_LONG: &str = "Input line too long.\n";

/// Greeting sent once the identity line has been processed.
pub fn welcome(name: &str) -> String {
    format!("Welcome {name}!\n")
}

/// A relayed chat line: `<name> [HH:MM]: <text>`.
pub fn chat<T: Timelike>(name: &str, at: &T, text: &str) -> String {
    format!("{name} [{}]: {text}\n", timestamp(at))
}

/// Hour and minute, zero padded.
pub fn timestamp<T: Timelike>(at: &T) -> String {
    format!("{:02}:{:02}", at.hour(), at.minute())
}

/// Reply to `SVR:who`: the header, then one name per line; entries flagged
/// `true` are the requester and get [`SELF_MARKER`].
pub fn who_listing<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let mut out = String::from(WHO_HEADER);
    for (name, is_self) in entries {
        out.push_str(name);
        if is_self {
            out.push_str(SELF_MARKER);
        }
        out.push('\n');
    }
    out
}

/// Reply to a successful rename, sent only to the renamed client.
pub fn renamed(name: &str) -> String {
    format!("Your new username is {name}\n")
}

/// System notice broadcast when a registered client leaves.
pub fn disconnected(name: &str) -> String {
    format!("The client {name} has disconnected.\n")
}
