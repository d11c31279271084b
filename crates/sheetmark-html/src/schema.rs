//! The closed set of `data-xls-*` annotations
//!
//! Table, column, row and cell annotations share one flat namespace.

use std::fmt;

/// Prefix shared by every annotation
pub const PREFIX: &str = "data-xls-";

macro_rules! annotations {
    ($( $variant:ident => $name:literal; )+) => {
        /// A recognized `data-xls-*` attribute
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Annotation {
            $( $variant, )+
        }

        impl Annotation {
            /// Every annotation, in declaration order
            pub const ALL: &'static [Annotation] = &[ $( Annotation::$variant, )+ ];

            /// Full attribute name, e.g. `data-xls-sheet`
            pub fn name(&self) -> &'static str {
                match self {
                    $( Annotation::$variant => concat!("data-xls-", $name), )+
                }
            }

            /// Look up an annotation by full attribute name
            pub fn from_name(name: &str) -> Option<Self> {
                let short = name.strip_prefix(PREFIX)?;
                match short {
                    $( $name => Some(Annotation::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

annotations! {
    // table
    Sheet => "sheet";
    Freeze => "freeze";
    Autosize => "autosize";
    Autofilter => "autofilter";
    DefaultColWidth => "default-col-width";
    Zoom => "zoom";
    PrintOrientation => "print-orientation";
    PrintFit => "print-fit";
    PageMargins => "page-margins";
    TabColor => "tab-color";
    Gridlines => "gridlines";
    // col
    Width => "width";
    Hidden => "hidden";
    Apply => "apply";
    // tr (data-xls-apply is also read from tr and td/th)
    Height => "height";
    // td / th
    Format => "format";
    Align => "align";
    Valign => "valign";
    Wrap => "wrap";
    Colspan => "colspan";
    Rowspan => "rowspan";
    Formula => "formula";
    Hyperlink => "hyperlink";
    Link => "link";
    LinkTooltip => "link-tooltip";
    Comment => "comment";
    CommentAuthor => "comment-author";
    CommentWidth => "comment-width";
    CommentHeight => "comment-height";
    CommentVisible => "comment-visible";
    DvList => "dv-list";
    Type => "type";
    NumberLocale => "number-locale";
    Image => "image";
    ImgWidth => "img-width";
    ImgHeight => "img-height";
    BgColor => "bg-color";
    FontSize => "font-size";
    Border => "border";
    BorderColor => "border-color";
    Locked => "locked";
    FontColor => "font-color";
    FontBold => "font-bold";
    FontItalic => "font-italic";
    FontUnderline => "font-underline";
    FontName => "font-name";
    Conditional => "conditional";
}

impl Annotation {
    /// Check whether an attribute name belongs to the annotation namespace
    pub fn is_annotation_name(name: &str) -> bool {
        name.starts_with(PREFIX)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for annotation in Annotation::ALL {
            assert_eq!(Annotation::from_name(annotation.name()), Some(*annotation));
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(Annotation::from_name("data-xls-unknown"), None);
        assert_eq!(Annotation::from_name("sheet"), None);
        assert_eq!(Annotation::from_name("data-xls-"), None);
    }

    #[test]
    fn test_annotation_namespace() {
        assert_eq!(Annotation::ALL.len(), 47);
        assert!(Annotation::is_annotation_name("data-xls-sparkle"));
        assert!(!Annotation::is_annotation_name("data-id"));
        assert!(!Annotation::is_annotation_name("class"));
    }
}
