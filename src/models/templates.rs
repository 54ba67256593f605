//! 启动时的示例项目

use super::{FileEntry, FileNode, FolderEntry, Forest};

pub const DEFAULT_ACTIVE_FILE: &str = "html-boilerplate-index";
pub const DEFAULT_EXPANDED_FOLDER: &str = "html-boilerplate";

pub const HTML_BOILERPLATE: &str = r#"<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Preview</title>
    <style>
      html, body {
        height: 100%;
        margin: 0;
        padding: 0;
        width: 100%;
        font-family: sans-serif;
      }
      body {
        display: flex;
        flex-direction: column;
        justify-content: center;
        align-items: center;
        background-color: #f9f9f9;
      }
      h1 {
        text-align: center;
        color: #6a5;
      }
    </style>
  </head>
  <body>
    <h1>Hello, world!</h1>
    <p>Start editing to see changes in real-time!</p>
  </body>
</html>"#;

pub const TAILWIND_SETUP: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>Tailwind</title>
    <script src="https://cdn.tailwindcss.com"></script>
  </head>
  <body class="bg-gray-100 min-h-screen flex items-center justify-center">
    <div class="h-screen w-full p-6 bg-white rounded-lg shadow-lg">
      <h1 class="text-3xl font-bold text-blue-600 mb-4">Tailwind Ready</h1>
      <p class="text-gray-600 mb-4">Start building UIs with Tailwind CSS</p>
      <div class="grid grid-cols-2 gap-4">
        <button class="bg-blue-500 text-white py-2 px-4 rounded">Button 1</button>
        <button class="bg-purple-500 text-white py-2 px-4 rounded">Button 2</button>
      </div>
    </div>
  </body>
</html>"#;

pub const CSS_ANIMATION: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>CSS Animation</title>
    <style>
      body {
        display: flex;
        justify-content: center;
        align-items: center;
        height: 100vh;
        background-color: #f5f5f5;
        margin: 0;
      }
      .box {
        width: 100px;
        height: 100px;
        background-color: #0070f3;
        border-radius: 8px;
        animation: bounce 2s infinite;
      }
      @keyframes bounce {
        0%, 100% { transform: translateY(0); }
        50% { transform: translateY(-50px); }
      }
    </style>
  </head>
  <body>
    <div class="box"></div>
  </body>
</html>"#;

const BASE_CSS: &str = "body {\n  font-family: 'Inter', sans-serif;\n  margin: 0;\n  padding: 0;\n}\n";

fn template_folder(
    id: &str,
    name: &str,
    (html_suffix, html_name, html): (&str, &str, &str),
    (css_suffix, css_name): (&str, &str),
) -> FileNode {
    FolderEntry::new(id, name)
        .with_children(vec![
            FileEntry::new(format!("{id}-{html_suffix}"), html_name)
                .with_content(html)
                .with_breakpoints(vec![3, 11, 1])
                .into(),
            FileEntry::new(format!("{id}-{css_suffix}"), css_name)
                .with_content(BASE_CSS)
                .with_breakpoints(vec![2, 5, 9])
                .into(),
        ])
        .into()
}

pub fn seed_project() -> Forest {
    Forest::new(vec![
        template_folder(
            "html-boilerplate",
            "HTML Boilerplate",
            ("index", "index.html", HTML_BOILERPLATE),
            ("styles", "styles.css"),
        ),
        template_folder(
            "tailwind-setup",
            "Tailwind Setup",
            ("html", "tailwind.html", TAILWIND_SETUP),
            ("css", "tailwind.css"),
        ),
        template_folder(
            "css-animation",
            "CSS Animation",
            ("html", "animation.html", CSS_ANIMATION),
            ("css", "animation.css"),
        ),
        FolderEntry::new("public", "public").into(),
        FileEntry::new("package-json", "package.json")
            .with_content("{\n  \"name\": \"pixel-art\",\n  \"version\": \"0.1.0\",\n  \"private\": true\n}\n")
            .with_breakpoints(vec![4, 9, 11])
            .into(),
        FileEntry::new("readme-md", "README.md")
            .with_content("Hello world")
            .with_breakpoints(vec![1, 4])
            .into(),
        FileEntry::new("utils-js", "utils.js")
            .with_breakpoints(vec![1, 4])
            .into(),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/models/templates.rs"]
mod tests;
