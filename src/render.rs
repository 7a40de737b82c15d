use std::io::{self, Write};

use crate::model::card::{Card, HALF_STORY_POINTS_HTML};

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
	<meta charset='utf-8'>
	<style>
		* {
			font-family: Arial, sans-serif;
		}
		.issue {
			text-align: left;
			width: 700px;
			border: 1px solid black;
			border-collapse: collapse;
			margin-bottom: 20px;
			page-break-inside: avoid;
		}
		.left {
			width: 70px;
			text-align: center;
			vertical-align: top;
		}
		.big {
			font-size: 25px;
		}
		.description {
			min-height: 150px;
			white-space: pre-wrap;
		}
		th, td {
			padding: 6px;
			border: 1px solid black;
		}
	</style>
</head>
<body>
"#;

const DOCUMENT_TAIL: &str = "
</body>
</html>
";

fn card_markup(card: &Card) -> String {
    format!(
        r#"
<table class="issue">
	<thead>
		<tr>
			<th class="left big">{number}</th>
			<th class="big">{title}</th>
		</tr>
	</thead>
	<tbody>
		<tr>
			<td></td>
			<td><div class="description">{body}</div></td>
		</tr>
		<tr>
			<td class="left big">{story_points}</td>
			<td></td>
		</tr>
	</tbody>
</table>
"#,
        number = card.number,
        title = html_escape::encode_text(&card.title),
        body = html_escape::encode_text(&card.body),
        story_points = story_points_markup(&card.story_points),
    )
}

/// The half-point label is already an entity; everything else is plain text.
fn story_points_markup(story_points: &str) -> String {
    if story_points == HALF_STORY_POINTS_HTML {
        story_points.to_string()
    } else {
        html_escape::encode_text(story_points).into_owned()
    }
}

/// Build the complete HTML page, one card per entry, in input order.
pub fn render_document(cards: &[Card]) -> String {
    let mut html = String::from(DOCUMENT_HEAD);
    for card in cards {
        html.push_str(&card_markup(card));
    }
    html.push_str(DOCUMENT_TAIL);
    html
}

/// Write the page in one go so a failed run never leaves half a document behind.
pub fn write_document<W: Write>(cards: &[Card], out: &mut W) -> io::Result<()> {
    let html = render_document(cards);
    out.write_all(html.as_bytes())?;
    out.flush()
}
