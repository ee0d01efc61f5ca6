//! Scenario tests for the parser facade across the built-in vocabularies.

#[cfg(test)]
mod tests {
    use crate::address::{AddressParser, Country, ParserConfig, ParserConfigBuilder, Vocabulary};
    use crate::models::{AddressField, ParsedAddress};

    fn us() -> AddressParser {
        AddressParser::for_country(Country::Us).unwrap()
    }

    fn fields(parsed: &ParsedAddress) -> Vec<(AddressField, &str)> {
        parsed.iter().collect()
    }

    #[test]
    fn test_full_address_with_suffix() {
        let parsed = us().parse("1005 GRAVIER ST, NEW ORLEANS, LA 70112").unwrap();
        assert_eq!(
            fields(&parsed),
            vec![
                (AddressField::Number, "1005"),
                (AddressField::Street, "GRAVIER"),
                (AddressField::Suffix, "ST"),
                (AddressField::City, "NEW ORLEANS"),
                (AddressField::State, "LA"),
                (AddressField::Zip, "70112"),
            ]
        );
    }

    #[test]
    fn test_full_address_with_long_suffix() {
        let parsed = us().parse("1 INFINITE LOOP, CUPERTINO, CA 95014").unwrap();
        assert_eq!(parsed.get(AddressField::Number), Some("1"));
        assert_eq!(parsed.get(AddressField::Street), Some("INFINITE"));
        assert_eq!(parsed.get(AddressField::Suffix), Some("LOOP"));
        assert_eq!(parsed.get(AddressField::City), Some("CUPERTINO"));
        assert_eq!(parsed.get(AddressField::State), Some("CA"));
        assert_eq!(parsed.get(AddressField::Zip), Some("95014"));
    }

    #[test]
    fn test_postal_box() {
        let parsed = us().parse("PO BOX 123, SPRINGFIELD, IL 62701").unwrap();
        assert_eq!(parsed.get(AddressField::StreetLine), Some("PO BOX 123"));
        assert_eq!(parsed.get(AddressField::City), Some("SPRINGFIELD"));
        assert_eq!(parsed.get(AddressField::State), Some("IL"));
        assert_eq!(parsed.get(AddressField::Zip), Some("62701"));
        assert!(!parsed.contains(AddressField::Street));
        assert!(!parsed.contains(AddressField::Suffix));
        assert!(!parsed.contains(AddressField::Number));
    }

    #[test]
    fn test_dotted_postal_box_is_stripped() {
        let parsed = us().parse("P.O. Box 77, Springfield, IL 62701").unwrap();
        assert_eq!(parsed.get(AddressField::StreetLine), Some("PO BOX 77"));
    }

    #[test]
    fn test_armed_forces_form_wins_over_general() {
        // The general form would read this as number + street + city "APO".
        let parsed = us().parse("123 MAIN ST, APO, AE 09001").unwrap();
        assert_eq!(parsed.get(AddressField::StreetLine), Some("123 MAIN ST"));
        assert_eq!(parsed.get(AddressField::City), Some("APO"));
        assert_eq!(parsed.get(AddressField::State), Some("AE"));
        assert_eq!(parsed.get(AddressField::Zip), Some("09001"));
        assert!(!parsed.contains(AddressField::Number));
    }

    #[test]
    fn test_address_line_only() {
        let parsed = us().parse_address_line("123 MAIN ST APT 4", true).unwrap();
        assert_eq!(
            fields(&parsed),
            vec![
                (AddressField::Number, "123"),
                (AddressField::Street, "MAIN"),
                (AddressField::Suffix, "ST"),
                (AddressField::SecondaryUnit, "APT"),
                (AddressField::SecondaryNumber, "4"),
            ]
        );
    }

    #[test]
    fn test_address_line_ignores_place() {
        let parsed = us()
            .parse_address_line("123 MAIN ST APT 4, SPRINGFIELD, IL 62701", true)
            .unwrap();
        assert_eq!(parsed.get(AddressField::SecondaryNumber), Some("4"));
        assert!(parsed.iter().all(|(field, _)| !field.is_place()));
    }

    #[test]
    fn test_address_line_keeps_multi_word_street() {
        let parsed = us().parse_address_line("42 CAMINO REAL", true).unwrap();
        assert_eq!(parsed.get(AddressField::Street), Some("CAMINO REAL"));
    }

    #[test]
    fn test_unit_and_marker_forms_agree() {
        let parser = us();
        let named = parser.parse("123 MAIN ST APT 4B").unwrap();
        let marker = parser.parse("123 MAIN ST #4B").unwrap();
        for parsed in [&named, &marker] {
            assert_eq!(parsed.get(AddressField::SecondaryUnit), Some("APT"));
            assert_eq!(parsed.get(AddressField::SecondaryNumber), Some("4B"));
        }
        assert_eq!(named, marker);
    }

    #[test]
    fn test_trailing_rangeless_unit_stays_in_secondary() {
        let parsed = us().parse("123 MAIN ST APT 4 REAR").unwrap();
        assert_eq!(
            fields(&parsed),
            vec![
                (AddressField::Number, "123"),
                (AddressField::Street, "MAIN"),
                (AddressField::Suffix, "ST"),
                (AddressField::SecondaryUnit, "APT"),
                (AddressField::SecondaryNumber, "4 REAR"),
            ]
        );
        let line = us().parse_address_line("123 MAIN ST APT 4 REAR", true);
        assert_eq!(line.as_ref(), Some(&parsed));
    }

    #[test]
    fn test_unit_synonym_is_canonicalized() {
        let parsed = us().parse("350 5TH AVE SUITE 3300, NEW YORK, NY 10118").unwrap();
        assert_eq!(parsed.get(AddressField::Street), Some("5TH"));
        assert_eq!(parsed.get(AddressField::Suffix), Some("AVE"));
        assert_eq!(parsed.get(AddressField::SecondaryUnit), Some("STE"));
        assert_eq!(parsed.get(AddressField::SecondaryNumber), Some("3300"));
        assert_eq!(parsed.get(AddressField::City), Some("NEW YORK"));
    }

    #[test]
    fn test_directionals_around_street() {
        let parsed = us()
            .parse("500 North Main Street Southwest, Springfield, IL 62701")
            .unwrap();
        assert_eq!(parsed.get(AddressField::Predirectional), Some("N"));
        assert_eq!(parsed.get(AddressField::Street), Some("MAIN"));
        assert_eq!(parsed.get(AddressField::Suffix), Some("ST"));
        assert_eq!(parsed.get(AddressField::Postdirectional), Some("SW"));
    }

    #[test]
    fn test_street_named_after_direction() {
        let parsed = us().parse("77 NORTH ST, SALEM, MA 01970").unwrap();
        assert_eq!(parsed.get(AddressField::Street), Some("NORTH"));
        assert_eq!(parsed.get(AddressField::Suffix), Some("ST"));
        assert!(!parsed.contains(AddressField::Predirectional));
    }

    #[test]
    fn test_street_exception_keeps_single_letter() {
        let parsed = us().parse("123 AVENUE N, LUBBOCK, TX 79401").unwrap();
        assert_eq!(parsed.get(AddressField::Street), Some("AVENUE N"));
        assert!(!parsed.contains(AddressField::Suffix));
        assert!(!parsed.contains(AddressField::Postdirectional));
    }

    #[test]
    fn test_number_forms() {
        let parser = us();
        let fraction = parser.parse("123 1/2 MAIN ST").unwrap();
        assert_eq!(fraction.get(AddressField::Number), Some("123 1/2"));

        let grid = parser.parse("N123 W456 MAIN ST").unwrap();
        assert_eq!(grid.get(AddressField::Number), Some("N123W456"));

        let attached = parser.parse("123A MAIN ST").unwrap();
        assert_eq!(attached.get(AddressField::Number), Some("123A"));
    }

    #[test]
    fn test_raw_mode_skips_normalization() {
        let parsed = us()
            .parse_with("1005 Gravier Street, New Orleans, Louisiana 70112", false)
            .unwrap();
        assert_eq!(parsed.get(AddressField::Suffix), Some("STREET"));
        assert_eq!(parsed.get(AddressField::State), Some("LOUISIANA"));
    }

    #[test]
    fn test_raw_mode_has_no_inferred_unit() {
        let parsed = us().parse_with("123 MAIN ST #4B", false).unwrap();
        assert_eq!(parsed.get(AddressField::SecondaryNumber), Some("4B"));
        assert!(!parsed.contains(AddressField::SecondaryUnit));
    }

    #[test]
    fn test_case_is_kept_when_not_uppercasing() {
        let config = ParserConfigBuilder::default()
            .uppercase_input(false)
            .build()
            .unwrap();
        let parser =
            AddressParser::new(Vocabulary::builtin(Country::Us).unwrap(), config).unwrap();
        let parsed = parser.parse("1005 Gravier St, New Orleans, LA 70112").unwrap();
        assert_eq!(parsed.get(AddressField::Street), Some("Gravier"));
        assert_eq!(parsed.get(AddressField::Suffix), Some("ST"));
        assert_eq!(parsed.get(AddressField::City), Some("New Orleans"));
    }

    #[test]
    fn test_degenerate_input_yields_none() {
        let parser = us();
        assert!(parser.parse("").is_none());
        assert!(parser.parse("   \t").is_none());
        assert!(parser.parse_address_line("", true).is_none());
    }

    #[test]
    fn test_unmatched_input_yields_none() {
        let parser = us();
        assert!(parser.parse("NOT AN ADDRESS").is_none());
        assert!(parser.parse_address_line("MAIN STREET", true).is_none());
    }

    #[test]
    fn test_over_long_input_yields_none() {
        let config = ParserConfig {
            max_input_len: 20,
            ..ParserConfig::default()
        };
        let parser = AddressParser::new(Vocabulary::builtin(Country::Us).unwrap(), config).unwrap();
        assert!(parser.parse("123 MAIN ST").is_some());
        assert!(parser.parse("1005 GRAVIER ST, NEW ORLEANS, LA 70112").is_none());
    }

    #[test]
    fn test_canada() {
        let parser = AddressParser::for_country(Country::Ca).unwrap();
        let parsed = parser.parse("100 Queen St W, Toronto, ON M5H 2N2").unwrap();
        assert_eq!(parsed.get(AddressField::Street), Some("QUEEN"));
        assert_eq!(parsed.get(AddressField::Suffix), Some("ST"));
        assert_eq!(parsed.get(AddressField::Postdirectional), Some("W"));
        assert_eq!(parsed.get(AddressField::City), Some("TORONTO"));
        assert_eq!(parsed.get(AddressField::State), Some("ON"));
        assert_eq!(parsed.get(AddressField::Zip), Some("M5H 2N2"));
    }

    #[test]
    fn test_france() {
        let parser = AddressParser::for_country(Country::Fr).unwrap();
        let parsed = parser
            .parse("12 rue de la Paix, Paris, Ile-de-France 75002")
            .unwrap();
        assert_eq!(parsed.get(AddressField::Number), Some("12"));
        assert_eq!(parsed.get(AddressField::Street), Some("RUE DE LA PAIX"));
        assert_eq!(parsed.get(AddressField::City), Some("PARIS"));
        assert_eq!(parsed.get(AddressField::State), Some("IDF"));
        assert_eq!(parsed.get(AddressField::Zip), Some("75002"));
    }

    #[test]
    fn test_france_infers_localized_apartment() {
        let parser = AddressParser::for_country(Country::Fr).unwrap();
        let parsed = parser.parse_address_line("12 rue de la Paix #3", true).unwrap();
        assert_eq!(parsed.get(AddressField::SecondaryUnit), Some("APP"));
        assert_eq!(parsed.get(AddressField::SecondaryNumber), Some("3"));
    }

    #[test]
    fn test_substituted_grammar() {
        let us = us();
        let ca = AddressParser::for_country(Country::Ca).unwrap();
        let input = "100 QUEEN ST W, TORONTO, ON M5H 2N2";
        assert!(us.parse(input).is_none());
        let parsed = us.parse_with_grammar(input, ca.full_grammar(), true).unwrap();
        assert_eq!(parsed.get(AddressField::Zip), Some("M5H 2N2"));
    }

    #[test]
    fn test_line_grammar_through_parse_with_grammar() {
        let parser = us();
        let direct = parser.parse_address_line("123 MAIN ST APT 4", true);
        let via = parser.parse_with_grammar("123 MAIN ST APT 4", parser.line_grammar(), true);
        assert_eq!(direct, via);
    }

    #[test]
    fn test_renormalizing_parsed_values_is_a_no_op() {
        let parser = us();
        let inputs = [
            "1005 Gravier Street, New Orleans, Louisiana 70112",
            "500 North Main Street Southwest, Springfield, IL 62701",
            "123 Main St Suite 4, Springfield, IL 62701",
        ];
        for input in inputs {
            let parsed = parser.parse(input).unwrap();
            for (field, value) in parsed.iter() {
                assert_eq!(
                    parser.normalizer().normalize_value(field, value).as_deref(),
                    Some(value),
                    "{input}: {field}"
                );
            }
        }
    }

    #[test]
    fn test_parser_is_shared_across_threads() {
        let parser = us();
        let inputs = [
            "1005 GRAVIER ST, NEW ORLEANS, LA 70112",
            "1 INFINITE LOOP, CUPERTINO, CA 95014",
            "PO BOX 123, SPRINGFIELD, IL 62701",
            "123 MAIN ST #4B",
        ];
        let expected: Vec<Option<ParsedAddress>> =
            inputs.iter().map(|input| parser.parse(input)).collect();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for (input, expected) in inputs.iter().zip(&expected) {
                        assert_eq!(&parser.parse(input), expected);
                    }
                });
            }
        });
    }
}
