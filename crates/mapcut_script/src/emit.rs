use crate::ast::{Block, ScriptValue, Statement};

const TAB_WIDTH: usize = 4;

/// Keys whose value block is executable effect/trigger script rather than
/// data. Inside such a block the force-quoting heuristic is suspended.
const CODE_KEYS: &[&str] = &["allow", "gain_effect"];

/// Keys whose string values are conventionally left bare even in data
/// context (culture/religion/title-reference keywords).
const NO_FORCE_QUOTE_KEYS: &[&str] = &[
    "culture",
    "religion",
    "controls_religion",
    "mercenary_type",
    "title",
    "title_female",
    "title_prefix",
    "foa",
    "foa_female",
    "graphical_culture",
    "name_tier",
    "holy_site",
    "pentarchy",
];

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Comment line emitted verbatim ahead of the first statement.
    pub header: Option<String>,
    /// Identifier-keyed block statements dropped together with their whole
    /// subtree.
    pub skip_keys: Vec<String>,
}

/// Emit a top-level block as script text.
pub fn emit_block(root: &Block, opts: &EmitOptions) -> String {
    let mut out = String::new();
    if let Some(header) = &opts.header {
        out.push_str(header);
        out.push_str("\n\n");
    }
    write_statements(&mut out, root, opts, 0, false);
    out
}

fn write_statements(out: &mut String, block: &Block, opts: &EmitOptions, indent: usize, in_code: bool) {
    for stmt in block {
        write_statement(out, stmt, opts, indent, in_code);
    }
}

fn write_statement(out: &mut String, stmt: &Statement, opts: &EmitOptions, indent: usize, in_code: bool) {
    if let (Some(key), true) = (stmt.key.as_str(), stmt.value.is_block()) {
        if opts.skip_keys.iter().any(|t| t == key) {
            return;
        }
    }

    // The code context for everything nested under this statement. Threaded
    // as a value so an inner code-bearing key cannot clear a context opened
    // further out.
    let key_is_code = stmt
        .key
        .as_str()
        .is_some_and(|k| CODE_KEYS.contains(&k));
    let child_in_code = in_code || key_is_code;

    push_indent(out, indent);
    write_value(out, &stmt.key, opts, indent, in_code);
    out.push_str(" = ");

    match (&stmt.key, &stmt.value) {
        (ScriptValue::String(k), ScriptValue::String(v))
            if !in_code
                && v != "yes"
                && v != "no"
                && !NO_FORCE_QUOTE_KEYS.contains(&k.as_str()) =>
        {
            out.push('"');
            out.push_str(v);
            out.push('"');
        }
        _ => write_value(out, &stmt.value, opts, indent, child_in_code),
    }

    out.push('\n');
}

fn write_value(out: &mut String, value: &ScriptValue, opts: &EmitOptions, indent: usize, in_code: bool) {
    match value {
        ScriptValue::String(s) => {
            if s.chars().any(|c| matches!(c, ' ' | '\t' | '\r' | '\n' | '\'')) {
                out.push('"');
                out.push_str(s);
                out.push('"');
            } else {
                out.push_str(s);
            }
        }
        ScriptValue::Uint(n) => out.push_str(&n.to_string()),
        ScriptValue::Date(d) => out.push_str(&d.to_string()),
        ScriptValue::Decimal(d) => out.push_str(&d.to_string()),
        ScriptValue::Block(b) => {
            if b.is_empty() {
                out.push_str("{}");
            } else {
                out.push_str("{\n");
                write_statements(out, b, opts, indent + 1, in_code);
                push_indent(out, indent);
                out.push('}');
            }
        }
        ScriptValue::List(items) => {
            out.push_str("{ ");
            for item in items {
                write_value(out, item, opts, indent, in_code);
                out.push(' ');
            }
            out.push('}');
        }
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent * TAB_WIDTH {
        out.push(' ');
    }
}
