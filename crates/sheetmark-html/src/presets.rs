//! Built-in named styles

use std::collections::BTreeMap;

use sheetmark_core::{
    BorderEdge, BorderLineStyle, BorderStyle, Color, HorizontalAlignment, StyleDescriptor,
    VerticalAlignment,
};

const EURO_FR: &str = "[$€-fr-FR]";

/// The preset catalogue, keyed by style name
pub fn presets() -> BTreeMap<String, StyleDescriptor> {
    let right = || StyleDescriptor::new().horizontal_alignment(HorizontalAlignment::Right);
    let center = || StyleDescriptor::new().horizontal_alignment(HorizontalAlignment::Center);

    let entries = [
        (
            "th",
            StyleDescriptor::new()
                .bold(true)
                .font_color(Color::rgb(0x33, 0x33, 0x33))
                .fill_color(Color::rgb(0xEE, 0xEE, 0xEE))
                .horizontal_alignment(HorizontalAlignment::Center)
                .vertical_alignment(VerticalAlignment::Center)
                .wrap_text(true)
                .border(BorderStyle::new().with_bottom(BorderEdge::new(
                    BorderLineStyle::Thin,
                    Color::rgb(0xCC, 0xCC, 0xCC),
                ))),
        ),
        ("int", right().number_format("# ##0")),
        ("float2", right().number_format("# ##0,00")),
        ("float3", right().number_format("# ##0,000")),
        ("percent2", right().number_format("0,00%")),
        ("money", right().number_format(format!("# ##0,00 {EURO_FR}"))),
        (
            "money_accounting",
            right().number_format(format!(
                "_-* # ##0,00 {EURO_FR}_-;\\-* # ##0,00 {EURO_FR}_-;_-* \"-\"?? {EURO_FR}_-;_-@_-"
            )),
        ),
        ("date", center().number_format("dd/mm/yyyy")),
        (
            "date_long",
            StyleDescriptor::new()
                .horizontal_alignment(HorizontalAlignment::Left)
                .number_format("[$-fr-FR]dddd d mmmm yyyy"),
        ),
        ("time", center().number_format("hh:mm")),
        ("datetime", center().number_format("dd/mm/yyyy hh:mm")),
        ("duration", right().number_format("[h]:mm:ss")),
        ("bool_center", center()),
        (
            "text_wrap",
            StyleDescriptor::new()
                .vertical_alignment(VerticalAlignment::Top)
                .wrap_text(true),
        ),
        (
            "warn",
            StyleDescriptor::new().fill_color(Color::rgb(0xFF, 0xFF, 0x99)),
        ),
    ];

    entries
        .into_iter()
        .map(|(name, style)| (name.to_string(), style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalogue_names() {
        let names: Vec<String> = presets().into_keys().collect();
        assert_eq!(
            names,
            [
                "bool_center",
                "date",
                "date_long",
                "datetime",
                "duration",
                "float2",
                "float3",
                "int",
                "money",
                "money_accounting",
                "percent2",
                "text_wrap",
                "th",
                "time",
                "warn",
            ]
        );
    }

    #[test]
    fn test_header_style() {
        let th = presets().remove("th").unwrap();
        assert_eq!(th.font.bold, Some(true));
        assert_eq!(th.fill.color, Some(Color::rgb(0xEE, 0xEE, 0xEE)));
        assert_eq!(th.alignment.horizontal, Some(HorizontalAlignment::Center));
        assert_eq!(th.alignment.wrap_text, Some(true));
        let bottom = th.border.bottom.unwrap();
        assert_eq!(bottom.style, Some(BorderLineStyle::Thin));
        assert!(th.border.top.is_none());
    }

    #[test]
    fn test_number_formats() {
        let presets = presets();
        let format = |name: &str| presets[name].number_format.clone().unwrap();
        assert_eq!(format("int"), "# ##0");
        assert_eq!(format("money"), "# ##0,00 [$€-fr-FR]");
        assert_eq!(format("date"), "dd/mm/yyyy");
        assert_eq!(format("duration"), "[h]:mm:ss");
        assert!(format("money_accounting").starts_with("_-* # ##0,00 [$€-fr-FR]_-;"));
        assert!(presets["bool_center"].number_format.is_none());
    }
}
