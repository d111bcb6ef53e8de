//! Language badge colours.
//!
//! The renderer never looks colours up itself; it is handed a
//! [`LanguagePalette`]. [`LinguistPalette`] uses the colours GitHub shows for
//! each language and falls back to gray for anything it doesn't know.

use ratatui::style::Color;

pub trait LanguagePalette {
    fn color(&self, language: &str) -> Color;
}

/// GitHub linguist colours.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinguistPalette;

pub const FALLBACK_COLOR: Color = Color::Rgb(0x8b, 0x8b, 0x8b);

impl LanguagePalette for LinguistPalette {
    fn color(&self, language: &str) -> Color {
        let hex: u32 = match language {
            "Assembly" => 0x6e4c13,
            "Bourne Again Shell" | "Bourne Shell" | "zsh" => 0x89e051,
            "C" => 0x555555,
            "C#" => 0x178600,
            "C++" | "C/C++ Header" => 0xf34b7d,
            "Clojure" => 0xdb5855,
            "CMake" => 0xda3434,
            "CoffeeScript" => 0x244776,
            "CSS" => 0x563d7c,
            "Dart" => 0x00b4ab,
            "Dockerfile" => 0x384d54,
            "Elixir" => 0x6e4a7e,
            "Elm" => 0x60b5cc,
            "Erlang" => 0xb83998,
            "F#" => 0xb845fc,
            "Fortran 90" | "Fortran 77" => 0x4d41b1,
            "Go" => 0x00add8,
            "Groovy" => 0x4298b8,
            "Haskell" => 0x5e5086,
            "HTML" => 0xe34c26,
            "Java" => 0xb07219,
            "JavaScript" => 0xf1e05a,
            "JSON" => 0x292929,
            "JSX" => 0xf1e05a,
            "Julia" => 0xa270ba,
            "Kotlin" => 0xa97bff,
            "Lua" => 0x000080,
            "make" => 0x427819,
            "Markdown" => 0x083fa1,
            "Nix" => 0x7e7eff,
            "Objective-C" => 0x438eff,
            "OCaml" => 0xef7a08,
            "Perl" => 0x0298c3,
            "PHP" => 0x4f5d95,
            "PowerShell" => 0x012456,
            "Python" => 0x3572a5,
            "R" => 0x198ce7,
            "Ruby" => 0x701516,
            "Rust" => 0xdea584,
            "Sass" | "SCSS" => 0xc6538c,
            "Scala" => 0xc22d40,
            "SQL" => 0xe38c00,
            "Svelte" => 0xff3e00,
            "Swift" => 0xf05138,
            "TOML" => 0x9c4221,
            "TypeScript" => 0x3178c6,
            "Vuejs Component" => 0x41b883,
            "XML" => 0x0060ac,
            "YAML" => 0xcb171e,
            "Zig" => 0xec915c,
            _ => return FALLBACK_COLOR,
        };
        rgb(hex)
    }
}

fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_languages_have_their_colour() {
        assert_eq!(LinguistPalette.color("Rust"), Color::Rgb(0xde, 0xa5, 0x84));
        assert_eq!(LinguistPalette.color("Go"), Color::Rgb(0x00, 0xad, 0xd8));
    }

    #[test]
    fn unknown_languages_fall_back_to_gray() {
        assert_eq!(LinguistPalette.color("Brainfuck++"), FALLBACK_COLOR);
        assert_eq!(LinguistPalette.color("rust"), FALLBACK_COLOR);
    }
}
