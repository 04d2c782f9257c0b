//! The two page tools the scraping agent can call.
//!
//! Tools never fail: fetch and parse problems come back as observation text
//! so the controller can route around them.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Node, Selector};
use url::Url;

/// A capability the ReAct controller can invoke by name.
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    async fn run(&self, input: &str) -> String;
}

fn build_client() -> Client {
    Client::builder()
        .user_agent("thesis-matcher/0.1")
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Normalizes the raw `Action Input` into a URL: trims whitespace and quotes.
fn parse_input_url(input: &str) -> Result<Url, url::ParseError> {
    Url::parse(input.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`'))
}

async fn fetch_html(client: &Client, url: &Url) -> Result<String, reqwest::Error> {
    client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Fetches a page and returns its visible text.
pub struct WebPageScraperTool {
    client: Client,
}

impl WebPageScraperTool {
    pub fn new() -> Self {
        Self {
            client: build_client(),
        }
    }
}

#[async_trait]
impl AgentTool for WebPageScraperTool {
    fn name(&self) -> &str {
        "web_page_scraper"
    }

    fn description(&self) -> &str {
        "Useful for getting the content of a web page. Input should be a URL."
    }

    async fn run(&self, input: &str) -> String {
        let url = match parse_input_url(input) {
            Ok(url) => url,
            Err(e) => return format!("Error fetching webpage: invalid URL '{input}': {e}"),
        };
        match fetch_html(&self.client, &url).await {
            Ok(html) => page_text(&html),
            Err(e) => format!("Error fetching webpage: {e}"),
        }
    }
}

/// Lists the links of a page as `text: absolute-url` lines.
pub struct LinkExtractorTool {
    client: Client,
}

impl LinkExtractorTool {
    pub fn new() -> Self {
        Self {
            client: build_client(),
        }
    }
}

#[async_trait]
impl AgentTool for LinkExtractorTool {
    fn name(&self) -> &str {
        "link_extractor"
    }

    fn description(&self) -> &str {
        "Useful for extracting links from a webpage. Input should be a URL."
    }

    async fn run(&self, input: &str) -> String {
        let url = match parse_input_url(input) {
            Ok(url) => url,
            Err(e) => return format!("Error extracting links: invalid URL '{input}': {e}"),
        };
        match fetch_html(&self.client, &url).await {
            Ok(html) => extract_links(&html, &url).join("\n"),
            Err(e) => format!("Error extracting links: {e}"),
        }
    }
}

/// Visible text of an HTML document, whitespace collapsed.
/// Text inside `script`, `style` and `noscript` is dropped.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript"))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// All anchors with non-empty text, resolved against `base`.
pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let absolute = base.join(href).ok()?;
            let text = anchor.text().flat_map(str::split_whitespace).collect::<Vec<_>>();
            if text.is_empty() {
                return None;
            }
            Some(format!("{}: {}", text.join(" "), absolute))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIR_PAGE: &str = r#"
        <html>
          <head>
            <title>Chair of Robotics</title>
            <style>body { color: red; }</style>
            <script>var tracking = "ignore me";</script>
          </head>
          <body>
            <h1>Open   Theses</h1>
            <p>We offer
               Master theses in SLAM.</p>
            <a href="/theses/grasp">Grasp   planning</a>
            <a href="https://other.example.org/jobs">Jobs</a>
            <a href="/empty"></a>
            <a name="no-href">Anchor</a>
          </body>
        </html>
    "#;

    #[test]
    fn test_page_text_drops_scripts_and_collapses_whitespace() {
        let text = page_text(CHAIR_PAGE);
        assert!(text.contains("Open Theses"));
        assert!(text.contains("We offer Master theses in SLAM."));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_extract_links_resolves_relative_urls() {
        let base = Url::parse("https://robotics.example.edu/index.html").unwrap();
        let links = extract_links(CHAIR_PAGE, &base);
        assert_eq!(
            links,
            vec![
                "Grasp planning: https://robotics.example.edu/theses/grasp".to_string(),
                "Jobs: https://other.example.org/jobs".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_input_url_strips_quotes() {
        let url = parse_input_url(" \"https://example.edu/a\" ").unwrap();
        assert_eq!(url.as_str(), "https://example.edu/a");
        assert!(parse_input_url("not a url").is_err());
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported_as_observation() {
        let observation = WebPageScraperTool::new().run("not a url").await;
        assert!(observation.starts_with("Error fetching webpage"));
        let observation = LinkExtractorTool::new().run("").await;
        assert!(observation.starts_with("Error extracting links"));
    }
}
