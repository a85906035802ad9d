/// Folds a label for comparison: trimmed, lowercase, Portuguese diacritics
/// removed and whitespace runs collapsed to one space.
pub fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if is_combining_mark(ch) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(strip_accent(ch));
    }
    out
}
const fn is_combining_mark(ch: char) -> bool {
    matches!(ch, '\u{0300}'..='\u{036f}')
}
const fn strip_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' | 'ª' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'º' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
#[cfg(test)]
mod tests {
    use super::fold;
    #[test]
    fn folds_case_accents_and_spacing() {
        assert_eq!(fold("  Código  do\u{a0}Serviço "), "codigo do servico");
        assert_eq!(fold("MÊS"), "mes");
        assert_eq!(fold("% Sobre Total"), "% sobre total");
    }
    #[test]
    fn drops_decomposed_marks() {
        assert_eq!(fold("Diagno\u{301}stico"), "diagnostico");
    }
}
