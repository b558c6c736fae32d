//! TOML emitter for the scene editor's actor list.
//!
//! The layout is fixed by the editor and written by hand rather than through a
//! generic TOML serializer:
//!
//! ```toml
//! [[Actor]]
//! 	Name = "En_Test"
//! 	Index = 2
//! 	Objects = [50]
//! 	[[Actor.Property]]
//! 		Mask = 3840
//! 		Name = "Presets"
//! 		Target = "Var"
//! 		Dropdown = [
//! 			[1,"One"],
//! 			[2,"Two"]
//! 		]
//! ```
//!
//! Only `Notes` is escaped (newlines and double quotes). Other strings are
//! written verbatim.

use crate::model::{DropdownOption, NormalizedActor, PropertyEntry};

/// Line-oriented writer that indents with one tab per nesting level.
///
/// Each line starts with a newline followed by the current indentation, so the
/// output begins with an empty line.
#[derive(Debug, Default)]
pub struct TomlWriter {
    out: String,
    depth: usize,
}

impl TomlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Emits `text` on a new line at the current depth.
    pub fn line(&mut self, text: &str) {
        self.out.push_str(&line_break(self.depth));
        self.out.push_str(text);
    }

    /// Emits `header`, then runs `body` one level deeper.
    ///
    /// The depth is restored when `body` returns, whatever path it took.
    pub fn block<F>(&mut self, header: &str, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(header);
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Newline followed by `depth` tabs.
fn line_break(depth: usize) -> String {
    let mut text = String::with_capacity(depth + 1);
    text.push('\n');
    text.extend(std::iter::repeat_n('\t', depth));
    text
}

/// Renders actors as `[[Actor]]` blocks, each followed by a blank line.
pub fn write_actors(actors: &[NormalizedActor]) -> String {
    let mut writer = TomlWriter::new();

    for actor in actors {
        writer.block("[[Actor]]", |w| write_actor(w, actor));
        writer.line("");
    }

    writer.finish()
}

fn write_actor(w: &mut TomlWriter, actor: &NormalizedActor) {
    w.line(&format!("Name = \"{}\"", actor.name));
    w.line(&format!("Index = {}", actor.index));

    if let Some(category) = &actor.category {
        w.line(&format!("Category = \"{}\"", category));
    }
    if let Some(notes) = &actor.notes {
        w.line(&format!("Notes = \"{}\"", escape_notes(notes)));
    }
    if let Some(objects) = &actor.objects {
        w.line(&format!("Objects = {}", integer_array(objects)));
    }

    for property in actor.properties.iter().flatten() {
        w.block("[[Actor.Property]]", |w| write_property(w, property));
    }
}

fn write_property(w: &mut TomlWriter, property: &PropertyEntry) {
    w.line(&format!("Mask = {}", property.mask));
    w.line(&format!("Name = \"{}\"", property.name));
    w.line(&format!("Target = \"{}\"", property.target));

    if let Some(dropdown) = &property.dropdown {
        let literal = dropdown_array(dropdown, w.depth());
        w.line(&format!("Dropdown = {}", literal));
    }
}

/// Escapes newlines and double quotes; nothing else.
pub fn escape_notes(notes: &str) -> String {
    notes.replace('\n', "\\n").replace('"', "\\\"")
}

fn integer_array(values: &[u32]) -> String {
    let items: Vec<String> = values.iter().map(u32::to_string).collect();
    format!("[{}]", items.join(","))
}

/// One `[value,"label"]` pair per line, one level deeper than `depth`, with the
/// closing bracket back at `depth`.
fn dropdown_array(options: &[DropdownOption], depth: usize) -> String {
    let inner = line_break(depth + 1);
    let outer = line_break(depth);
    let pairs: Vec<String> = options.iter().map(dropdown_pair).collect();

    format!("[{inner}{}{outer}]", pairs.join(&format!(",{inner}")))
}

fn dropdown_pair(option: &DropdownOption) -> String {
    let label = serde_json::Value::String(option.label().to_string());
    format!("[{},{}]", option.value(), label)
}
