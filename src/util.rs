//! Misc small utilities shared across modules.
use crate::constants::DISCORD_MESSAGE_LIMIT;

/// Split a reply into pieces Discord will accept, breaking at line boundaries where possible.
/// A single line longer than the limit is cut on char boundaries.
pub fn chunk_reply(text: &str) -> Vec<String> {
    chunk_with_limit(text, DISCORD_MESSAGE_LIMIT)
}

pub fn chunk_with_limit(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in text.split('\n') {
        let needed = if current.is_empty() {
            line.chars().count()
        } else {
            current.chars().count() + 1 + line.chars().count()
        };
        if needed <= limit {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            continue;
        }
        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        let mut rest: Vec<char> = line.chars().collect();
        while rest.len() > limit {
            let tail = rest.split_off(limit);
            chunks.push(rest.into_iter().collect());
            rest = tail;
        }
        current = rest.into_iter().collect();
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::chunk_with_limit;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_with_limit("a\nb", 10), vec!["a\nb".to_string()]);
    }

    #[test]
    fn splits_on_lines_then_chars() {
        let chunks = chunk_with_limit("aaaa\nbbbb\ncccccccccc", 9);
        assert_eq!(chunks, vec!["aaaa\nbbbb", "ccccccccc", "c"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 9));
    }
}
