//! Export file naming from the customer's name.

use chrono::NaiveDateTime;

use crate::model::Contact;

/// Stem shared by every export file name.
pub const FILE_STEM: &str = "zakaz";

/// Latin spelling of a lowercase Cyrillic letter.
fn transliterate_char(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' | 'ы' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Reduce a name to `[a-z0-9_]`.
///
/// Lowercases, transliterates Cyrillic, turns each whitespace run into one
/// underscore and drops everything else.
pub fn filename_safe(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;

    for ch in s.trim().to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;

        if let Some(latin) = transliterate_char(ch) {
            out.push_str(latin);
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            out.push(ch);
        }
    }

    out
}

/// File name for an export: `zakaz-<last>-<first>.<ext>`.
///
/// When either name is missing or sanitizes to nothing, falls back to
/// `zakaz-<YYYYMMDD-HHMMSS>.<ext>` using `now`.
pub fn export_file_name(contact: &Contact, extension: &str, now: NaiveDateTime) -> String {
    let last = filename_safe(&contact.last_name);
    let first = filename_safe(&contact.first_name);

    if last.is_empty() || first.is_empty() {
        format!("{}-{}.{}", FILE_STEM, now.format("%Y%m%d-%H%M%S"), extension)
    } else {
        format!("{}-{}-{}.{}", FILE_STEM, last, first, extension)
    }
}

/// Same as [`export_file_name`], timestamped with the local clock.
pub fn export_file_name_now(contact: &Contact, extension: &str) -> String {
    export_file_name(contact, extension, chrono::Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    #[test]
    fn test_filename_safe() {
        assert_eq!(filename_safe("Иван"), "ivan");
        assert_eq!(filename_safe("Петров"), "petrov");
        assert_eq!(filename_safe("Щукин-Жуков"), "schukinzhukov");
        assert_eq!(filename_safe("  Анна   Мария "), "anna_mariya");
        assert_eq!(filename_safe("Юлия Ёлкина"), "yuliya_elkina");
        assert_eq!(filename_safe("O'Brien 2"), "obrien_2");
        assert_eq!(filename_safe("Объект"), "obekt");
        assert_eq!(filename_safe("!!!"), "");
    }

    #[test]
    fn test_export_file_name() {
        let contact = Contact::new("Иван", "Петров", "+7 900 000 00 00");
        assert_eq!(
            export_file_name(&contact, "xlsx", fixed_time()),
            "zakaz-petrov-ivan.xlsx"
        );
    }

    #[test]
    fn test_export_file_name_fallback() {
        let expected = "zakaz-20260305-140709.xlsx";
        assert_eq!(
            export_file_name(&Contact::default(), "xlsx", fixed_time()),
            expected
        );
        let only_first = Contact::new("Иван", "", "");
        assert_eq!(export_file_name(&only_first, "xlsx", fixed_time()), expected);
        let unusable = Contact::new("???", "Петров", "");
        assert_eq!(export_file_name(&unusable, "xlsx", fixed_time()), expected);
    }

    #[test]
    fn test_export_file_name_now_shape() {
        let name = export_file_name_now(&Contact::default(), "xlsx");
        assert!(name.starts_with("zakaz-"));
        assert!(name.ends_with(".xlsx"));
        assert_eq!(name.len(), "zakaz-20260305-140709.xlsx".len());
    }
}
