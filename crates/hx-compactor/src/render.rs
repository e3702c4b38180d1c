//! C header rendering for the three layouts.
//!
//! Every layout embeds the image as `const char <name>_data[] PROGMEM`.
//! After macro expansion and string concatenation the array holds exactly
//! the input bytes.

use crate::encode::{EncodedStream, Token};
use crate::palette::Palette;
use crate::select::SelectedPatternSet;
use hx_core::{ident, HxError, PixelBuffer, RenderConfig, Result};

/// Identifier and dimensions written into the header.
#[derive(Debug, Clone, Copy)]
pub struct HeaderSpec<'a> {
    pub name: &'a str,
    pub width: u32,
    pub height: u32,
}

/// `\xHH` for every byte.
pub fn hex_escape(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("\\x{b:02x}")).collect()
}

fn dimensions(spec: &HeaderSpec) -> String {
    format!(
        "const uint16_t {name}_width  = {w};\nconst uint16_t {name}_height = {h};\n\n",
        name = spec.name,
        w = spec.width,
        h = spec.height,
    )
}

fn data_decl(spec: &HeaderSpec) -> String {
    format!("const char {}_data[] PROGMEM =\n", spec.name)
}

fn cleanup<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("// Cleanup macros\n");
    for name in names {
        out.push_str(&format!("#undef {name}\n"));
    }
    out
}

/// One quoted string, `raw_bytes_per_line` bytes per line.
pub fn render_raw(spec: &HeaderSpec, bytes: &[u8], config: &RenderConfig) -> String {
    let mut out = String::from("#include <pgmspace.h>\n\n");
    out.push_str(&dimensions(spec));
    out.push_str(&data_decl(spec));

    let lines: Vec<String> = bytes
        .chunks(config.raw_bytes_per_line)
        .map(|chunk| format!("\"{}\"", hex_escape(chunk)))
        .collect();
    out.push_str(&lines.join("\n"));
    out.push_str(";\n");
    out
}

/// One token per pixel: a palette macro or a quoted two-byte literal.
pub fn render_palette(
    spec: &HeaderSpec,
    pixels: &PixelBuffer,
    palette: &Palette,
    config: &RenderConfig,
) -> String {
    let mut out = String::from("#include <pgmspace.h>\n\n");
    for entry in palette.entries() {
        out.push_str(&format!(
            "#define {} \"{}\"\n",
            entry.name,
            hex_escape(&entry.color.to_le_bytes())
        ));
    }
    out.push('\n');
    out.push_str(&dimensions(spec));
    out.push_str(&data_decl(spec));

    let tokens: Vec<String> = pixels
        .pixels()
        .map(|px| match palette.lookup(px) {
            Some(name) => name.to_string(),
            None => format!("\"{}\"", hex_escape(&px.to_le_bytes())),
        })
        .collect();
    let lines: Vec<String> = tokens
        .chunks(config.pixels_per_line)
        .map(|line| format!("  {}", line.join(" ")))
        .collect();
    out.push_str(&lines.join("\n"));
    out.push_str(";\n\n");

    out.push_str(&cleanup(palette.entries().iter().map(|e| e.name.as_str())));
    out
}

/// Accumulates body pieces and breaks lines.
struct BodyWriter<'a> {
    config: &'a RenderConfig,
    lines: Vec<String>,
    line: Vec<String>,
    run: String,
}

impl<'a> BodyWriter<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        Self { config, lines: Vec::new(), line: Vec::new(), run: String::new() }
    }

    fn literal(&mut self, byte: u8) {
        self.run.push_str(&hex_escape(&[byte]));
        if self.run.len() > self.config.literal_flush_chars {
            self.flush_run();
        }
    }

    fn symbol(&mut self, name: &str) {
        self.flush_run();
        self.line.push(name.to_string());
    }

    fn flush_run(&mut self) {
        if !self.run.is_empty() {
            self.line.push(format!("\"{}\"", self.run));
            self.run.clear();
        }
    }

    fn break_line(&mut self) {
        self.flush_run();
        if !self.line.is_empty() {
            self.lines.push(self.line.join(" "));
            self.line.clear();
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines
            .iter()
            .map(|l| format!("  {l}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pattern macros followed by the encoded body.
pub fn render_pattern(
    spec: &HeaderSpec,
    set: &SelectedPatternSet,
    stream: &EncodedStream,
    config: &RenderConfig,
) -> Result<String> {
    let guard = ident::include_guard(spec.name);
    let mut out = format!("#ifndef {guard}\n#define {guard}\n\n#include <pgmspace.h>\n\n");
    for pattern in set {
        out.push_str(&format!(
            "#define {} \"{}\"\n",
            pattern.symbol,
            hex_escape(&pattern.bytes)
        ));
    }
    if !set.is_empty() {
        out.push('\n');
    }
    out.push_str(&dimensions(spec));
    out.push_str(&data_decl(spec));

    let mut body = BodyWriter::new(config);
    let mut pos = 0;
    let mut next_break = config.wrap_bytes;
    for token in stream.tokens() {
        match *token {
            Token::Literal(b) => {
                body.literal(b);
                pos += 1;
            }
            Token::SymbolRef(rank) => {
                let pattern = set.get(rank).ok_or_else(|| {
                    HxError::InvalidInput(format!("symbol reference {rank} has no pattern"))
                })?;
                body.symbol(pattern.symbol.as_str());
                pos += pattern.len();
            }
        }
        if pos >= next_break {
            body.break_line();
            while next_break <= pos {
                next_break += config.wrap_bytes;
            }
        }
    }
    out.push_str(&body.finish());
    out.push_str(";\n\n");

    out.push_str(&cleanup(set.iter().map(|p| p.symbol.as_str())));
    out.push_str(&format!("\n#endif // {guard}\n"));
    Ok(out)
}
