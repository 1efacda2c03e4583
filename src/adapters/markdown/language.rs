//! Code fence info string → store code-block language.

/// Languages the store accepts for code blocks.
const SUPPORTED: &[&str] = &[
    "abap", "arduino", "bash", "basic", "c", "clojure", "coffeescript", "c++", "c#", "css",
    "dart", "diff", "docker", "elixir", "elm", "erlang", "flow", "fortran", "f#", "gherkin",
    "glsl", "go", "graphql", "groovy", "haskell", "html", "java", "javascript", "json", "julia",
    "kotlin", "latex", "less", "lisp", "livescript", "lua", "makefile", "markdown", "markup",
    "matlab", "mermaid", "nix", "objective-c", "ocaml", "pascal", "perl", "php", "plain text",
    "powershell", "prolog", "protobuf", "python", "r", "reason", "ruby", "rust", "sass",
    "scala", "scheme", "scss", "shell", "sql", "swift", "typescript", "vb.net", "verilog",
    "vhdl", "visual basic", "webassembly", "xml", "yaml",
];

/// Fallback for unknown or missing languages.
pub const PLAIN_TEXT: &str = "plain text";

/// Map the first word of a fence info string to a supported language.
pub fn code_language(info: &str) -> &'static str {
    let tag = info
        .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    let canonical = match tag.as_str() {
        "rs" => "rust",
        "py" | "python3" => "python",
        "js" | "jsx" | "mjs" | "node" => "javascript",
        "ts" | "tsx" => "typescript",
        "sh" | "zsh" | "console" | "shell-session" => "shell",
        "yml" => "yaml",
        "cpp" | "cc" | "cxx" | "hpp" => "c++",
        "cs" | "csharp" => "c#",
        "fs" | "fsharp" => "f#",
        "dockerfile" => "docker",
        "golang" => "go",
        "kt" | "kts" => "kotlin",
        "rb" => "ruby",
        "md" => "markdown",
        "ps1" | "pwsh" => "powershell",
        "objc" | "objectivec" => "objective-c",
        "tex" => "latex",
        "make" | "mk" => "makefile",
        "proto" => "protobuf",
        "patch" => "diff",
        "wasm" | "wat" => "webassembly",
        "htm" => "html",
        "gql" => "graphql",
        "" | "text" | "txt" | "plaintext" => PLAIN_TEXT,
        other => other,
    };

    SUPPORTED
        .iter()
        .find(|supported| **supported == canonical)
        .copied()
        .unwrap_or(PLAIN_TEXT)
}
