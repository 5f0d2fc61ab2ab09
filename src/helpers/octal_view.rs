// Take a run of words and return an octal view of it, one word per line,
// with the printable characters alongside. This is the view the dump tool
// prints for raw label and catalog regions.

use crate::helpers::chars::word_chars;
use crate::words::Word36;

pub fn octal_view(words: &[Word36]) -> String {
    let mut out = String::new();
    for (i, &w) in words.iter().enumerate() {
        let chars: String = word_chars(w).iter().collect();
        out.push_str(&format!("    {i:4} {w:012o} {chars}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_word() {
        let view = octal_view(&[0o115165154164, 0]);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("115165154164"));
        assert!(lines[0].contains("Mult"));
    }
}
