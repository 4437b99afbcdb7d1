use std::fs;
use std::io;

/// Decode the textual `.ls8` program format: each meaningful line starts with
/// a run of `0`/`1` characters read as a binary literal, with anything after
/// it treated as commentary. Blank and comment-only lines are skipped.
pub fn parse_source(source:&str) -> Vec<u8> {
    let mut program:Vec<u8> = Vec::new();

    for line in source.lines() {
        let first_word = match line.split_whitespace().next() {
            Some(word) => word,
            None => continue,
        };
        if first_word.is_empty() || !first_word.chars().all(|c| c == '0' || c == '1') {
            continue;
        }
        if let Ok(byte) = u8::from_str_radix(first_word, 2) {
            program.push(byte);
        }
    }

    program
}

pub fn load_file(path:&str) -> io::Result<Vec<u8>> {
    let source = fs::read_to_string(path)?;
    Ok(parse_source(&source))
}

#[cfg(test)]
mod tests {
    use super::parse_source;

    #[test]
    fn test_parse_skips_commentary() {
        let source = "\
# print8.ls8: Print the number 8 on the screen

10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";
        let program = parse_source(source);
        assert_eq!(program, vec![0b10000010, 0, 8, 0b01000111, 0, 0b00000001]);
    }

    #[test]
    fn test_parse_empty_source() {
        assert_eq!(parse_source(""), Vec::<u8>::new());
        assert_eq!(parse_source("# nothing here\n\n"), Vec::<u8>::new());
    }

    #[test]
    fn test_parse_ignores_overlong_literals() {
        // more than 8 digits cannot be a byte; the line is dropped
        assert_eq!(parse_source("111111111\n00000001\n"), vec![1]);
    }
}
