//! Call signatures of a native in each supported language.

use std::fmt;
use std::str::FromStr;

use crate::natives::{Native, Param};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Lua,
    Js,
    CSharp,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::C, Language::Lua, Language::Js, Language::CSharp];

    pub fn tag(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Lua => "lua",
            Language::Js => "js",
            Language::CSharp => "cs",
        }
    }

    /// File extension syntect knows the language by.
    pub fn extension(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Lua => "lua",
            Language::Js => "js",
            Language::CSharp => "cs",
        }
    }

    /// Lenient parse: unknown tags fall back to C.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(Language::C)
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::C => &[],
            Language::Lua => &[
                "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto",
                "if", "in", "local", "nil", "not", "or", "repeat", "return", "then", "true",
                "until", "while",
            ],
            Language::Js => &[
                "break", "case", "catch", "class", "const", "continue", "default", "delete", "do",
                "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
                "instanceof", "let", "new", "return", "super", "switch", "this", "throw", "try",
                "typeof", "var", "void", "while", "with", "yield",
            ],
            Language::CSharp => &[
                "base", "bool", "break", "case", "catch", "char", "checked", "class", "const",
                "continue", "default", "do", "double", "else", "enum", "event", "false", "fixed",
                "float", "for", "foreach", "if", "in", "int", "is", "lock", "long", "namespace",
                "new", "null", "object", "out", "params", "ref", "return", "string", "struct",
                "switch", "this", "true", "try", "uint", "using", "var", "void", "while",
            ],
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "cpp" | "c++" | "native" => Ok(Language::C),
            "lua" => Ok(Language::Lua),
            "js" | "javascript" | "ts" | "typescript" => Ok(Language::Js),
            "cs" | "c#" | "csharp" => Ok(Language::CSharp),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn param_name(param: &Param, index: usize, language: Language) -> String {
    let name = if param.name.is_empty() {
        format!("p{}", index)
    } else {
        param.name.clone()
    };
    if language.keywords().iter().any(|k| *k == name) {
        format!("{}_", name)
    } else {
        name
    }
}

fn arguments(native: &Native, language: Language) -> String {
    native
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| param_name(p, i, language))
        .collect::<Vec<_>>()
        .join(", ")
}

fn call_name(native: &Native) -> &str {
    if native.display_name.is_empty() {
        &native.key
    } else {
        &native.display_name
    }
}

/// Map a native type onto the closest C# spelling.
fn cs_type(kind: &str) -> String {
    let trimmed = kind.trim_end_matches('*');
    match trimmed {
        "" | "void" => "void".to_string(),
        "BOOL" => "bool".to_string(),
        "Any" => "object".to_string(),
        "Hash" => "uint".to_string(),
        "char" => "string".to_string(),
        other => other.to_string(),
    }
}

/// Render the call signature of `native` in `language`.
pub fn format_signature(native: &Native, language: Language) -> String {
    let name = call_name(native);
    let args = arguments(native, language);

    match language {
        Language::C => {
            let raw = native.raw_name.trim_start_matches('_');
            let raw = if raw.is_empty() { native.key.as_str() } else { raw };
            let results = if native.results.is_empty() {
                "void"
            } else {
                native.results.as_str()
            };
            let params = native
                .params
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{} {}", p.kind, param_name(p, i, language)).trim().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("// {}\n{} {}({});", native.key, results, raw, params)
        }
        Language::Lua => {
            if native.is_void() {
                format!("{}({})", name, args)
            } else {
                format!("local retval --[[ {} ]] = {}({})", native.results, name, args)
            }
        }
        Language::Js => {
            if native.is_void() {
                format!("{}({});", name, args)
            } else {
                format!("const retval = {}({});", name, args)
            }
        }
        Language::CSharp => {
            let call = if native.is_void() {
                format!("{}({});", name, args)
            } else {
                format!("{} retval = {}({});", cs_type(&native.results), name, args)
            };
            format!("using static CitizenFX.Core.Native.API;\n\n{}", call)
        }
    }
}
