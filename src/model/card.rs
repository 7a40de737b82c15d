use super::issue::RawIssue;

const STORY_POINTS_MARKER: &str = "SP";
const HALF_STORY_POINTS: &str = "1/2SP";

/// Display form of half a story point, already HTML-encoded.
pub const HALF_STORY_POINTS_HTML: &str = "&frac12;SP";

/// One printable card, derived from a single issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub number: u64,
    pub title: String,
    /// Issue body without the story-point line.
    pub body: String,
    /// Empty when the issue carries no estimate.
    pub story_points: String,
}

impl From<RawIssue> for Card {
    fn from(issue: RawIssue) -> Self {
        let (body, story_points) = extract_story_points(&issue.body);
        Card {
            number: issue.number,
            title: issue.title,
            body,
            story_points,
        }
    }
}

/// Split a trailing story-point line off an issue body.
///
/// Returns `(body, story_points)`. The last line counts as an estimate when it
/// contains `SP` anywhere, so `"SPECIAL NOTE"` is treated as one too.
pub fn extract_story_points(body: &str) -> (String, String) {
    let mut lines: Vec<&str> = body.split('\n').collect();

    let last = match lines.last() {
        Some(last) if last.contains(STORY_POINTS_MARKER) => *last,
        _ => return (body.to_string(), String::new()),
    };

    let story_points = if last == HALF_STORY_POINTS {
        HALF_STORY_POINTS_HTML.to_string()
    } else {
        last.to_string()
    };

    lines.pop();
    (lines.join("\n"), story_points)
}
