/// The upstream body reduced to the two fields the relay cares about.
///
/// The provider answers with JSON on most paths but falls back to an
/// XML-shaped payload on certain errors, so the body is tried as JSON
/// first and as `<status>`/`<message>` tag extraction second.
#[derive(Debug, PartialEq)]
pub enum UpstreamBody {
    Parsed { status: String, message: String },
    Unrecognized,
}

impl UpstreamBody {
    pub fn interpret(raw: &str) -> Self {
        if let Some(parsed) = Self::from_json(raw) {
            return parsed;
        }
        if let Some(parsed) = Self::from_tagged_text(raw) {
            return parsed;
        }
        UpstreamBody::Unrecognized
    }

    fn from_json(raw: &str) -> Option<Self> {
        #[derive(serde::Deserialize)]
        struct Body {
            status: Option<String>,
            message: Option<String>,
        }

        let body: Body = serde_json::from_str(raw).ok()?;
        Some(UpstreamBody::Parsed {
            status: body.status.unwrap_or_default(),
            message: body.message.unwrap_or_default(),
        })
    }

    fn from_tagged_text(raw: &str) -> Option<Self> {
        let status = extract_tag(raw, "status");
        let message = extract_tag(raw, "message");
        if status.is_none() && message.is_none() {
            return None;
        }
        Some(UpstreamBody::Parsed {
            status: status.unwrap_or_default().to_string(),
            message: message.unwrap_or_default().to_string(),
        })
    }
}

fn extract_tag<'a>(raw: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = raw.find(&open)? + open.len();
    let end = raw[start..].find(&close)? + start;
    Some(&raw[start..end])
}
