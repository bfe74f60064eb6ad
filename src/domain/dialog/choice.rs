//! Choice recognition for list prompts.

/// Matches a reply against a list of choices.
///
/// A reply matches a choice when it equals the choice ignoring case and
/// surrounding whitespace, or when it is the choice's 1-based position.
pub fn recognize_choice<S: AsRef<str>>(reply: &str, choices: &[S]) -> Option<usize> {
    let reply = reply.trim();
    if reply.is_empty() {
        return None;
    }

    let lowered = reply.to_lowercase();
    if let Some(index) = choices
        .iter()
        .position(|c| c.as_ref().trim().to_lowercase() == lowered)
    {
        return Some(index);
    }

    match reply.parse::<usize>() {
        Ok(n) if n >= 1 && n <= choices.len() => Some(n - 1),
        _ => None,
    }
}
