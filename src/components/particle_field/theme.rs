//! Colors for the particle field.
//!
//! Particles share one fill color. Colors come from configuration as CSS
//! strings and go back out to the canvas unchanged, so anything the canvas
//! understands as a fill style works: hex, color functions, and keywords.
//! Parsing only checks the shape of the string; the canvas resolves it.

use serde::Deserialize;
use thiserror::Error;

/// CSS color functions accepted as fill styles.
const COLOR_FUNCTIONS: &[&str] = &[
	"rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color",
];

/// Failure to read a CSS color string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorError {
	/// Not hex, a color function, or a keyword.
	#[error("unsupported color syntax: {0:?}")]
	Syntax(String),
	/// A functional form whose name is not a CSS color function.
	#[error("unknown color function {function:?} in {input:?}")]
	Function { input: String, function: String },
}

/// A CSS color string, as handed to the canvas fill style.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(String);

impl Color {
	pub fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self(format!("rgb({r}, {g}, {b})"))
	}

	pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self(format!("rgba({r}, {g}, {b}, {a})"))
	}

	pub fn as_css(&self) -> &str {
		&self.0
	}

	/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, CSS color functions
	/// with comma or space separated arguments, and color keywords.
	pub fn parse(input: &str) -> Result<Self, ColorError> {
		let s = input.trim();
		let syntax = || ColorError::Syntax(input.to_string());

		if let Some(hex) = s.strip_prefix('#') {
			if !matches!(hex.len(), 3 | 4 | 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
				return Err(syntax());
			}
			return Ok(Self(s.to_ascii_lowercase()));
		}

		if let Some((name, rest)) = s.split_once('(') {
			let args = rest.strip_suffix(')').ok_or_else(syntax)?;
			let args_ok = !args.trim().is_empty()
				&& args
					.chars()
					.all(|c| c.is_ascii_alphanumeric() || " ,./%+-".contains(c));
			if !args_ok {
				return Err(syntax());
			}
			let function = name.trim().to_ascii_lowercase();
			if !COLOR_FUNCTIONS.contains(&function.as_str()) {
				return Err(ColorError::Function {
					input: input.to_string(),
					function,
				});
			}
			return Ok(Self(s.to_string()));
		}

		if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) {
			return Ok(Self(s.to_ascii_lowercase()));
		}
		Err(syntax())
	}
}

impl TryFrom<String> for Color {
	type Error = ColorError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_functional_forms() {
		assert_eq!(Color::parse("#1976D2").unwrap().as_css(), "#1976d2");
		assert_eq!(
			Color::parse("rgba(255,255,255,0.42)").unwrap().as_css(),
			"rgba(255,255,255,0.42)"
		);
		assert_eq!(Color::parse(" rgb(10, 20, 30) ").unwrap().as_css(), "rgb(10, 20, 30)");
	}

	#[test]
	fn accepts_every_canvas_fill_form() {
		for css in [
			"#fff",
			"#fff8",
			"#ffffff80",
			"white",
			"transparent",
			"hsl(0, 0%, 100%)",
			"hsla(210 40% 90% / 0.5)",
			"rgb(255 255 255 / 0.4)",
			"oklch(0.9 0.02 250)",
		] {
			assert_eq!(Color::parse(css).map(|c| c.as_css().to_string()), Ok(css.to_string()));
		}
		assert_eq!(Color::parse("White").unwrap().as_css(), "white");
	}

	#[test]
	fn rejects_garbage() {
		for css in ["", "#12345", "#ggg", "rgb(1, 2", "rgb()", "red; color: blue", "12"] {
			assert!(matches!(Color::parse(css), Err(ColorError::Syntax(_))), "{css}");
		}
		assert!(matches!(
			Color::parse("url(sprite)"),
			Err(ColorError::Function { .. })
		));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).as_css(), "rgb(255, 0, 16)");
		assert_eq!(Color::rgba(255, 255, 255, 0.35).as_css(), "rgba(255, 255, 255, 0.35)");
	}

	#[test]
	fn deserializes_from_a_json_string() {
		let color: Color = serde_json::from_str(r#""hsl(0, 0%, 100%)""#).unwrap();
		assert_eq!(color.as_css(), "hsl(0, 0%, 100%)");
		assert!(serde_json::from_str::<Color>(r#""not a color""#).is_err());
	}
}
