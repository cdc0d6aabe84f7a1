// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_chat_reply(sections: usize) -> String {
    let base = "## Step\n\nRun this with `cargo`:\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n- [x] done\n- [ ] todo\n  - nested **item**\n\n| a | b |\n|:--|--:|\n| 1 | 2 |\n\n";
    base.repeat(sections)
}

#[allow(dead_code)]
pub fn generate_nested_list(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        content.push_str(&"  ".repeat(level));
        content.push_str(&format!("- level {level}\n"));
    }
    content
}
