//! HTML rendering of the chat page.

use minijinja::Environment;
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use tutor_ai::{LearningLevel, Role, EXPORT_FILE_NAME};

use super::error::AppError;
use super::sessions::BrowserSession;

const PAGE_TEMPLATE_NAME: &str = "page.html";
const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Things shown on the page that are not part of the session itself.
#[derive(Debug, Default)]
pub struct PageExtras {
    /// Banner text shown above the input box.
    pub notice: Option<String>,
    /// Text put back into the input box.
    pub draft: String,
}

#[derive(Serialize)]
struct LevelOption {
    name: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct MessageView<'a> {
    role: &'static str,
    label: &'static str,
    content: &'a str,
    /// Sanitized HTML for assistant replies; user text is escaped as-is.
    html: Option<String>,
}

#[derive(Serialize)]
struct UsageView {
    calls: u64,
    input_tokens: u64,
    output_tokens: u64,
    total_tokens: u64,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    subject: &'a str,
    dark_mode: bool,
    level: &'static str,
    levels: Vec<LevelOption>,
    messages: Vec<MessageView<'a>>,
    has_history: bool,
    usage: UsageView,
    notice: Option<&'a str>,
    draft: &'a str,
    export_file_name: &'static str,
}

/// Compiled page template.
pub struct PageRenderer {
    env: Environment<'static>,
    title: String,
    subject: String,
}

impl PageRenderer {
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
            .map_err(|e| AppError::Render(e.to_string()))?;
        Ok(Self {
            env,
            title: title.into(),
            subject: subject.into(),
        })
    }

    pub fn render(&self, session: &BrowserSession, extras: &PageExtras) -> Result<String, AppError> {
        let messages = session
            .conversation
            .all()
            .iter()
            .filter_map(|msg| {
                let (role, label, html) = match msg.role {
                    Role::User => ("user", "You", None),
                    Role::Assistant => ("assistant", "AI", Some(render_markdown(&msg.content))),
                    Role::System => return None,
                };
                Some(MessageView {
                    role,
                    label,
                    content: &msg.content,
                    html,
                })
            })
            .collect();

        let total = session.tracker.total();
        let context = PageContext {
            title: &self.title,
            subject: &self.subject,
            dark_mode: session.dark_mode,
            level: session.level.as_str(),
            levels: LearningLevel::ALL
                .iter()
                .map(|level| LevelOption {
                    name: level.as_str(),
                    selected: *level == session.level,
                })
                .collect(),
            messages,
            has_history: !session.conversation.is_empty(),
            usage: UsageView {
                calls: session.tracker.call_count(),
                input_tokens: total.input_tokens,
                output_tokens: total.output_tokens,
                total_tokens: total.total_tokens(),
            },
            notice: extras.notice.as_deref(),
            draft: &extras.draft,
            export_file_name: EXPORT_FILE_NAME,
        };

        self.env
            .get_template(PAGE_TEMPLATE_NAME)
            .and_then(|template| template.render(context))
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

/// Render a reply as markdown, then strip anything that is not plain
/// formatting markup. The result is safe to emit unescaped.
fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(source, options));
    ammonia::clean(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> PageRenderer {
        PageRenderer::new("Ask AI: Your Data Science Helper", "Data Science").unwrap()
    }

    #[test]
    fn renders_title_and_levels() {
        let session = BrowserSession::new(LearningLevel::Intermediate, false);
        let html = renderer().render(&session, &PageExtras::default()).unwrap();

        assert!(html.contains("Ask AI: Your Data Science Helper"));
        assert!(html.contains(r#"value="Intermediate" checked"#));
        assert!(!html.contains(r#"value="Beginner" checked"#));
        assert!(!html.contains("Download Chat History"));
    }

    #[test]
    fn renders_messages_with_labels_and_escapes_content() {
        let mut session = BrowserSession::new(LearningLevel::Beginner, false);
        session.conversation.append_user("<script>alert(1)</script>");
        session.conversation.append_assistant("Use a & b");

        let html = renderer().render(&session, &PageExtras::default()).unwrap();

        assert!(html.contains("You:"));
        assert!(html.contains("AI:"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("Use a &amp; b"));
        assert!(html.contains("Download Chat History"));
        assert!(html.contains("chat_history.txt"));
    }

    #[test]
    fn assistant_replies_render_as_markdown() {
        let mut session = BrowserSession::new(LearningLevel::Beginner, false);
        session.conversation.append_user("**not bold**");
        session
            .conversation
            .append_assistant("**x**\n\n- one\n- two\n\n```\nfit(X)\n```");

        let html = renderer().render(&session, &PageExtras::default()).unwrap();

        assert!(html.contains("<strong>x</strong>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<pre><code>fit(X)"));
        // User text stays literal.
        assert!(html.contains("**not bold**"));
    }

    #[test]
    fn assistant_markup_is_sanitized() {
        let mut session = BrowserSession::new(LearningLevel::Beginner, false);
        session.conversation.append_assistant(
            "Hi <script>alert(2)</script> <a href=\"javascript:alert(3)\" onclick=\"x()\">link</a>",
        );

        let html = renderer().render(&session, &PageExtras::default()).unwrap();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("alert(2)"));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("onclick"));
        assert!(html.contains("link</a>"));
    }

    #[test]
    fn renders_notice_and_draft() {
        let session = BrowserSession::new(LearningLevel::Beginner, true);
        let extras = PageExtras {
            notice: Some("The tutor could not answer: Rate limited".into()),
            draft: "What is bagging?".into(),
        };

        let html = renderer().render(&session, &extras).unwrap();

        assert!(html.contains("The tutor could not answer: Rate limited"));
        assert!(html.contains("What is bagging?"));
        assert!(html.contains(r#"class="dark""#));
    }
}
