//! HTML rendering for the question page.

/// Values handed to the page; `None` or empty fields are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    pub question: Option<String>,
    pub normalized_question: Option<String>,
    pub answer: Option<String>,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn section(id: &str, title: &str, body: &str) -> String {
    format!(
        "    <section id=\"{id}\">\n      <h2>{title}</h2>\n      <div class=\"content\">{}</div>\n    </section>\n",
        escape_html(body)
    )
}

pub fn render_index(view: &PageView) -> String {
    let prefill = present(&view.question).map(escape_html).unwrap_or_default();

    let mut sections = String::new();
    if let Some(q) = present(&view.question) {
        sections.push_str(&section("question", "Your Question", q));
    }
    if let Some(n) = present(&view.normalized_question) {
        sections.push_str(&section("processed-question", "Processed Question", n));
    }
    if let Some(a) = present(&view.answer) {
        sections.push_str(&section("answer", "Answer", a));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Quick Answer</title>
    <style>
      body {{ font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
      textarea {{ width: 100%; min-height: 6rem; }}
      .content {{ white-space: pre-wrap; background: #f6f6f6; padding: 0.75rem; border-radius: 4px; }}
    </style>
  </head>
  <body>
    <h1>Quick Answer</h1>
    <form method="post" action="/">
      <label for="question-input">Ask a question</label>
      <textarea id="question-input" name="question">{prefill}</textarea>
      <button type="submit">Ask</button>
    </form>
{sections}  </body>
</html>
"#
    )
}
