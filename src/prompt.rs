//! Prompt construction and response sanitization.
//!
//! Both halves are pure string processing: [`build`] wraps the user's
//! query in the instruction template sent to every provider, and
//! [`sanitize_command`] reduces a raw, possibly markdown-decorated model
//! reply to a single bare command line. Sanitization is total: it never
//! fails, and at worst returns an empty string.

/// Shell and language names models like to prefix a command with.
const LANGUAGE_PREFIXES: [&str; 6] = ["bash", "sh", "zsh", "shell", "cmd", "powershell"];

/// Creates the prompt sent to the AI provider for a query.
pub fn build(query: &str) -> String {
    format!(
        "You are a command line assistant that helps users with shell commands.\n\
         User wants assistance with the following task:\n\
         \n\
         {}\n\
         \n\
         Instructions:\n\
         - Respond with a single command that achieves the desired result\n\
         - The command should be suitable for {} operating system\n\
         - Output ONLY the command, without any explanation\n\
         - Do not include any quotes, backticks, or markdown formatting\n\
         - If the task requires multiple commands, chain them with && or ;\n\
         - If you're unsure, provide the most common/standard approach\n",
        query,
        user_os()
    )
}

/// Cleans up an AI response to extract just the command.
///
/// Strips fenced code blocks and their language tags, surrounding
/// backticks, and leading shell-name lines, then collapses the result
/// onto a single line. Idempotent.
///
/// Known limitation: the fence handling is line-based and naive, so a
/// command whose own text starts a line with three backticks is
/// swallowed as a fence marker.
pub fn sanitize_command(raw: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for line in raw.trim().lines() {
        let trimmed = line.trim();

        // Leading blank lines before any content.
        if kept.is_empty() && trimmed.is_empty() {
            continue;
        }

        // Fence markers are dropped, language tag and all.
        if trimmed.starts_with("```") {
            continue;
        }

        kept.push(line);
    }

    let joined = kept.join("\n");
    let mut text = joined.trim_matches('`').to_string();

    // Shell-name prefixes only count when a line break follows, so this
    // runs before the newline collapse.
    for lang in LANGUAGE_PREFIXES {
        if text.len() > lang.len()
            && text.as_bytes()[lang.len()] == b'\n'
            && text[..lang.len()].eq_ignore_ascii_case(lang)
        {
            text = text[lang.len() + 1..].to_string();
        }
    }

    let mut text = text.replace('\n', " ");
    while text.contains("  ") {
        text = text.replace("  ", " ");
    }

    text.trim().to_string()
}

/// Resolves the running platform to the name used in the prompt.
fn user_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "macOS",
        "linux" => "Linux",
        "windows" => "Windows",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_embeds_query_and_os() {
        let prompt = build("list files");

        assert!(prompt.contains("list files"));
        assert!(prompt.contains("single command"));
        assert!(prompt.contains(user_os()));
    }

    #[test]
    fn test_build_empty_query_still_well_formed() {
        let prompt = build("");

        assert!(prompt.contains("shell commands"));
        assert!(prompt.contains(user_os()));
    }

    #[test]
    fn test_user_os_is_display_name() {
        let os = user_os();

        match std::env::consts::OS {
            "macos" => assert_eq!(os, "macOS"),
            "linux" => assert_eq!(os, "Linux"),
            "windows" => assert_eq!(os, "Windows"),
            other => assert_eq!(os, other),
        }
    }

    #[test]
    fn test_sanitize_passthrough_and_whitespace() {
        let cases = [
            ("ls -la", "ls -la"),
            ("  ls -la  ", "ls -la"),
            ("", ""),
            ("   \n\n   ", ""),
            ("\n\nls -la", "ls -la"),
        ];

        for (input, want) in cases {
            assert_eq!(sanitize_command(input), want, "input: {input:?}");
        }
    }

    #[test]
    fn test_sanitize_strips_code_fences() {
        let cases = [
            ("```bash\nls -la\n```", "ls -la"),
            ("```\nls -la\n```", "ls -la"),
            ("```\n```", ""),
            (
                "```bash\nfind . -name \"*.go\" -type f\n```",
                "find . -name \"*.go\" -type f",
            ),
        ];

        for (input, want) in cases {
            assert_eq!(sanitize_command(input), want, "input: {input:?}");
        }
    }

    #[test]
    fn test_sanitize_strips_inline_backticks() {
        let cases = [
            ("`ls -la`", "ls -la"),
            ("ls -la`", "ls -la"),
            ("`ls -la", "ls -la"),
        ];

        for (input, want) in cases {
            assert_eq!(sanitize_command(input), want, "input: {input:?}");
        }
    }

    #[test]
    fn test_sanitize_strips_language_prefixes() {
        let cases = [
            ("bash\nls -la", "ls -la"),
            ("sh\nls -la", "ls -la"),
            ("zsh\nls -la", "ls -la"),
            ("BASH\nls -la", "ls -la"),
            ("powershell\nGet-ChildItem", "Get-ChildItem"),
            ("cmd\ndir /s", "dir /s"),
            // A shell name not followed by a line break is a command.
            ("bash script.sh", "bash script.sh"),
        ];

        for (input, want) in cases {
            assert_eq!(sanitize_command(input), want, "input: {input:?}");
        }
    }

    #[test]
    fn test_sanitize_collapses_onto_one_line() {
        let cases = [
            ("ls -la\npwd", "ls -la pwd"),
            ("ls   -la    /tmp", "ls -la /tmp"),
            (
                "```bash\nfind . -name \"*.go\" \\\n  -type f\n```",
                "find . -name \"*.go\" \\ -type f",
            ),
        ];

        for (input, want) in cases {
            assert_eq!(sanitize_command(input), want, "input: {input:?}");
        }
    }

    #[test]
    fn test_sanitize_naive_fence_handling() {
        // A fence line inside a block toggles anyway; the literal
        // backticks survive only when they are not at line start.
        assert_eq!(sanitize_command("```\necho '```'\n```"), "echo '```'");

        // A one-line fenced wrapper is swallowed by the fence heuristic.
        assert_eq!(sanitize_command("```ls -la```"), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "ls -la",
            "```bash\nls -la\n```",
            "`ls -la`",
            "bash\nls -la",
            "ls -la\npwd",
            "ls   -la    /tmp",
            "   \n\n   ",
            "```\necho '```'\n```",
        ];

        for input in inputs {
            let once = sanitize_command(input);
            assert_eq!(sanitize_command(&once), once, "input: {input:?}");
        }
    }
}
