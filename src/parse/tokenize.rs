/// Strip any directory prefix: everything up to and including the last `/` or `\`.
///
/// `/usr/bin/find` → `find`, `C:\tools\rg.exe` → `rg.exe`, `bin/` → ``.
pub fn strip_path_prefix(word: &str) -> &str {
    match word.rfind(['/', '\\']) {
        Some(idx) => &word[idx + 1..],
        None => word,
    }
}

/// Reduce a sub-command to the name used for rule matching.
///
/// A one-word command becomes its path-stripped word. Anything longer keeps
/// two words, the first path-stripped and the second as written, so a table
/// can target both `find` and `npm install`:
///
/// - `find` → `find`
/// - `/usr/bin/find . -name x` → `find .`
/// - `npm install express` → `npm install`
pub fn command_name(command: &str) -> String {
    let mut words = command.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };
    let first = strip_path_prefix(first);
    match words.next() {
        Some(second) => format!("{first} {second}"),
        None => first.to_string(),
    }
}
