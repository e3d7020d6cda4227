//! Credential table for the login terminal.

/// PIN length in digits.
pub const PIN_LEN: usize = 4;

/// Registered user names.
pub const USERS: [&str; 10] = [
    "Petar Petrovic",
    "Marko Markovic",
    "Nebojsa Mitrovic",
    "Teodora Petrovic",
    "Ivan Ivanovic",
    "Boris Radovanovic",
    "Nebojsa Ralevic",
    "Bojana Petkovic",
    "Milos Milosevic",
    "Milan Lukic",
];

/// PIN per user, index-aligned with [`USERS`].
const PINS: [&[u8; PIN_LEN]; 10] = [
    b"5346", b"2133", b"7445", b"8756", b"7435", b"6346", b"8536", b"1234", b"3464", b"1102",
];

/// Look up a user by exact full name.
pub fn find_user(name: &str) -> Option<usize> {
    USERS.iter().position(|&user| user == name)
}

/// Check a PIN entry against the given user's PIN.
pub fn check_pin(user: usize, pin: &[u8; PIN_LEN]) -> bool {
    PINS[user] == pin
}
