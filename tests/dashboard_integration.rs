//! End-to-end flow over the in-memory transport: load a repository tree,
//! open an HTML file and check the rendered preview.

use std::sync::Mutex;

use futures_util::future::join;
use repodeck::core::mock::MockTransport;
use repodeck::core::{Dashboard, FileTree, GitHubClient, Loaded, Method, NodeId, RenderSurface};
use serde_json::json;

const API: &str = "https://api.github.com/repos/octo/site";
const RAW: &str = "https://raw.githubusercontent.com/octo/site/gh-pages";

#[derive(Default)]
struct Frame {
    documents: Mutex<Vec<String>>,
}

impl RenderSurface for Frame {
    fn render(&self, document: String) {
        self.documents.lock().unwrap().push(document);
    }
}

fn encode(text: &str) -> String {
    use base64::Engine;
    base64::prelude::BASE64_STANDARD.encode(text)
}

fn site() -> MockTransport {
    let index = r#"<!DOCTYPE html>
<html>
<head>
  <link rel="stylesheet" href="css/site.css">
  <link rel="stylesheet" href="https://cdn.example.com/reset.css">
  <script src="../js/app.js" defer></script>
</head>
<body>
  <a href="about.html">About</a>
  <img src="/img/logo.png">
</body>
</html>"#;

    MockTransport::new()
        .json(API, json!({
            "name": "site", "full_name": "octo/site", "owner": {"login": "octo"},
            "html_url": "https://github.com/octo/site", "default_branch": "gh-pages"
        }))
        .json(
            &format!("{API}/git/trees/gh-pages?recursive=1"),
            json!({"sha": "root", "truncated": false, "tree": [
                {"path": "js/app.js", "type": "blob", "sha": "j1"},
                {"path": "docs/index.html", "type": "blob", "sha": "i1"},
                {"path": "docs/css/site.css", "type": "blob", "sha": "c1"},
                {"path": "docs", "type": "tree", "sha": "d1"},
                {"path": "README.md", "type": "blob", "sha": "r1"}
            ]}),
        )
        .json(
            &format!("{API}/contents/docs/index.html?ref=gh-pages"),
            json!({
                "name": "index.html", "path": "docs/index.html", "type": "file", "sha": "i1",
                "encoding": "base64", "content": encode(index)
            }),
        )
        .route(Method::Get, &format!("{RAW}/docs/css/site.css"), 200, "body { margin: 0 }")
        .route(Method::Get, &format!("{RAW}/js/app.js"), 500, "oops")
}

#[tokio::test]
async fn test_browse_and_preview_site() {
    let dash = Dashboard::new(GitHubClient::new(site()).with_token("t"), Frame::default());

    let tree = dash.load_tree("octo", "site").await.unwrap().current().unwrap();
    let names: Vec<&str> = tree.tree[NodeId::ROOT]
        .children()
        .iter()
        .map(|id| tree.tree[*id].name.as_str())
        .collect();
    assert_eq!(names, ["docs", "js", "README.md"]);

    let file = dash
        .open_file("octo", "site", "docs/index.html")
        .await
        .unwrap()
        .current()
        .unwrap();
    assert!(file.content.starts_with("<!DOCTYPE html>"));

    let documents = dash.surface().documents.lock().unwrap().clone();
    assert_eq!(documents.len(), 1);
    let doc = &documents[0];

    // Fetched stylesheet is inlined; external and failed resources stay as tags
    assert!(doc.contains("<style>body { margin: 0 }</style>"));
    assert!(doc.contains(r#"href="https://cdn.example.com/reset.css""#));
    assert!(doc.contains(&format!(r#"src="{RAW}/js/app.js""#)));
    assert!(doc.contains(&format!(r#"href="{RAW}/docs/about.html""#)));
    assert!(doc.contains(&format!(r#"src="{RAW}/img/logo.png""#)));

    // The external stylesheet is never fetched
    let transport = dash.client().transport();
    assert_eq!(transport.request_count("https://cdn.example.com/reset.css"), 0);
    assert_eq!(transport.request_count(&format!("{RAW}/docs/css/site.css")), 1);
}

#[tokio::test]
async fn test_only_latest_selection_renders() {
    let readme = format!("{API}/contents/README.md?ref=gh-pages");
    let index = format!("{API}/contents/docs/index.html?ref=gh-pages");
    let transport = site()
        .json(&readme, json!({
            "name": "README.md", "path": "README.md", "type": "file", "sha": "r1",
            "encoding": "base64", "content": encode("# Site")
        }))
        .delay(&index, 10);
    let dash = Dashboard::new(GitHubClient::new(transport), Frame::default());
    dash.load_tree("octo", "site").await.unwrap();

    let (html, markdown) = join(
        dash.open_file("octo", "site", "docs/index.html"),
        dash.open_file("octo", "site", "README.md"),
    )
    .await;

    assert_eq!(html.unwrap(), Loaded::Superseded);
    assert_eq!(markdown.unwrap().current().unwrap().content, "# Site");
    assert!(dash.surface().documents.lock().unwrap().is_empty());
    assert_eq!(dash.current_file().unwrap().path, "README.md");
}

#[test]
fn test_tree_rebuild_is_stable() {
    let entries = vec![
        repodeck::models::TreeEntry::file("b/z.txt", "1"),
        repodeck::models::TreeEntry::file("a.txt", "2"),
        repodeck::models::TreeEntry::directory("b", "3"),
    ];
    assert_eq!(FileTree::build(&entries), FileTree::build(&entries));
}
