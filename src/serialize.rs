//! Binary save/load of syntax trees.
//!
//! The format is little-endian and mirrors the pool directly: a `u64`
//! parent count and the parent handles, then a `u64` pool count and each
//! node in order. A node starts with a `u32` type tag and its `u32` line
//! number, followed by a tag-specific body. Length prefixes are `u64`,
//! handles, tags and int literals are 32 bits wide, float literals are IEEE
//! 754 single precision, and booleans are one byte, so a saved tree loads
//! identically across platforms.

use std::io::{self, Read, Write};

use crate::ast::{Ast, NO_NODE, Node, NodeHandle, NodeKind, OpKind};

const TAG_OP: u32 = 0;
const TAG_KEYWORD: u32 = 1;
const TAG_ID: u32 = 2;
const TAG_NUMBER: u32 = 3;

const KEYWORD_IF: u32 = 0;
const KEYWORD_FOR: u32 = 1;
const KEYWORD_FUNC: u32 = 2;
const KEYWORD_RETURN: u32 = 3;
const KEYWORD_BREAK: u32 = 4;
const KEYWORD_CONTINUE: u32 = 5;

const ID_FUNC: u32 = 0;
const ID_VAR: u32 = 1;

const NUMBER_INT: u32 = 0;
const NUMBER_FLOAT: u32 = 1;

/// Serializes a tree into a writer.
///
/// # Errors
/// Propagates any I/O error from the writer.
///
/// # Example
/// ```
/// use propscript::{compile_source, serialize::{load_ast, save_ast}};
///
/// let ast = compile_source("x = 1 + 2\nprint(x)").unwrap();
///
/// let mut buffer = Vec::new();
/// save_ast(&ast, &mut buffer).unwrap();
///
/// let loaded = load_ast(&mut buffer.as_slice()).unwrap();
/// assert_eq!(loaded, ast);
/// ```
pub fn save_ast<W: Write>(ast: &Ast, w: &mut W) -> io::Result<()> {
    write_u64(w, ast.parents.len() as u64)?;
    for &handle in &ast.parents {
        write_u32(w, handle)?;
    }

    write_u64(w, ast.pool.len() as u64)?;
    for node in &ast.pool {
        save_node(node, w)?;
    }

    Ok(())
}

/// Deserializes a tree from a reader.
///
/// # Errors
/// Fails with `InvalidData` on unknown tags or malformed strings, and
/// propagates I/O errors (including truncation) from the reader.
pub fn load_ast<R: Read>(r: &mut R) -> io::Result<Ast> {
    let mut ast = Ast::new();

    // Length prefixes come from the file, so nothing is preallocated from
    // them; reads fail at the true end of input instead.
    let parent_count = read_len(r)?;
    for _ in 0..parent_count {
        ast.parents.push(read_u32(r)?);
    }

    let pool_count = read_len(r)?;
    for _ in 0..pool_count {
        let node = load_node(r)?;
        ast.pool.push(node);
    }

    Ok(ast)
}

fn save_node<W: Write>(node: &Node, w: &mut W) -> io::Result<()> {
    match &node.kind {
        NodeKind::Op { op,
                       left,
                       right,
                       in_parens, } => {
            write_u32(w, TAG_OP)?;
            write_u32(w, node.line)?;
            write_u32(w, *op as u32)?;
            write_u32(w, *left)?;
            write_u32(w, *right)?;
            write_bool(w, *in_parens)?;
        },
        NodeKind::If { condition,
                       code,
                       else_code, } => {
            write_u32(w, TAG_KEYWORD)?;
            write_u32(w, node.line)?;
            write_keyword(w,
                          KEYWORD_IF,
                          code,
                          Some(*condition),
                          else_code.as_deref(),
                          "",
                          &[],
                          None)?;
        },
        NodeKind::For { condition, code } => {
            write_u32(w, TAG_KEYWORD)?;
            write_u32(w, node.line)?;
            write_keyword(w, KEYWORD_FOR, code, Some(*condition), None, "", &[], None)?;
        },
        NodeKind::Func { name, params, code } => {
            write_u32(w, TAG_KEYWORD)?;
            write_u32(w, node.line)?;
            write_keyword(w, KEYWORD_FUNC, code, None, None, name, params, None)?;
        },
        NodeKind::Return { value } => {
            write_u32(w, TAG_KEYWORD)?;
            write_u32(w, node.line)?;
            write_keyword(w, KEYWORD_RETURN, &[], None, None, "", &[], *value)?;
        },
        NodeKind::Break => {
            write_u32(w, TAG_KEYWORD)?;
            write_u32(w, node.line)?;
            write_keyword(w, KEYWORD_BREAK, &[], None, None, "", &[], None)?;
        },
        NodeKind::Continue => {
            write_u32(w, TAG_KEYWORD)?;
            write_u32(w, node.line)?;
            write_keyword(w, KEYWORD_CONTINUE, &[], None, None, "", &[], None)?;
        },
        NodeKind::Call { name, args } => {
            write_u32(w, TAG_ID)?;
            write_u32(w, node.line)?;
            write_u32(w, ID_FUNC)?;
            write_str(w, name)?;
            write_handles(w, args)?;
        },
        NodeKind::Var { name, index } => {
            write_u32(w, TAG_ID)?;
            write_u32(w, node.line)?;
            write_u32(w, ID_VAR)?;
            write_str(w, name)?;
            match index {
                Some(handle) => write_handles(w, &[*handle])?,
                None => write_handles(w, &[])?,
            }
        },
        NodeKind::Int(value) => {
            write_u32(w, TAG_NUMBER)?;
            write_u32(w, node.line)?;
            write_u32(w, NUMBER_INT)?;
            write_i32(w, *value)?;
            write_f32(w, 0.0)?;
        },
        NodeKind::Float(value) => {
            write_u32(w, TAG_NUMBER)?;
            write_u32(w, node.line)?;
            write_u32(w, NUMBER_FLOAT)?;
            write_i32(w, 0)?;
            write_f32(w, *value)?;
        },
    }

    Ok(())
}

/// Writes the unified keyword record shared by every control-flow and
/// declaration form. Absent handles are the [`NO_NODE`] sentinel; fields a
/// form does not use are written as empty.
#[allow(clippy::too_many_arguments)]
fn write_keyword<W: Write>(w: &mut W,
                           sub_tag: u32,
                           code: &[NodeHandle],
                           condition: Option<NodeHandle>,
                           else_code: Option<&[NodeHandle]>,
                           name: &str,
                           params: &[String],
                           return_val: Option<NodeHandle>)
                           -> io::Result<()> {
    write_u32(w, sub_tag)?;
    write_handles(w, code)?;
    write_u32(w, condition.unwrap_or(NO_NODE))?;
    write_bool(w, else_code.is_some())?;
    write_handles(w, else_code.unwrap_or(&[]))?;
    write_str(w, name)?;
    write_u64(w, params.len() as u64)?;
    for param in params {
        write_str(w, param)?;
    }
    write_u32(w, return_val.unwrap_or(NO_NODE))?;
    Ok(())
}

fn load_node<R: Read>(r: &mut R) -> io::Result<Node> {
    let tag = read_u32(r)?;
    let line = read_u32(r)?;

    let kind = match tag {
        TAG_OP => {
            let op = OpKind::from_tag(read_u32(r)?).ok_or_else(|| {
                                                        invalid_data("unknown operator tag")
                                                    })?;
            let left = read_u32(r)?;
            let right = read_u32(r)?;
            let in_parens = read_bool(r)?;
            NodeKind::Op { op,
                           left,
                           right,
                           in_parens }
        },
        TAG_KEYWORD => {
            let sub_tag = read_u32(r)?;
            let code = read_handles(r)?;
            let condition = read_u32(r)?;
            let has_else = read_bool(r)?;
            let else_code = read_handles(r)?;
            let name = read_str(r)?;
            let param_count = read_len(r)?;
            let mut params = Vec::new();
            for _ in 0..param_count {
                params.push(read_str(r)?);
            }
            let return_val = read_u32(r)?;

            match sub_tag {
                KEYWORD_IF => NodeKind::If { condition,
                                             code,
                                             else_code: has_else.then_some(else_code) },
                KEYWORD_FOR => NodeKind::For { condition, code },
                KEYWORD_FUNC => NodeKind::Func { name,
                                                 params,
                                                 code },
                KEYWORD_RETURN => {
                    NodeKind::Return { value: (return_val != NO_NODE).then_some(return_val) }
                },
                KEYWORD_BREAK => NodeKind::Break,
                KEYWORD_CONTINUE => NodeKind::Continue,
                _ => return Err(invalid_data("unknown keyword tag")),
            }
        },
        TAG_ID => {
            let sub_tag = read_u32(r)?;
            let name = read_str(r)?;
            let params = read_handles(r)?;

            match sub_tag {
                ID_FUNC => NodeKind::Call { name, args: params },
                ID_VAR => NodeKind::Var { name,
                                          index: params.first().copied() },
                _ => return Err(invalid_data("unknown identifier tag")),
            }
        },
        TAG_NUMBER => {
            let sub_tag = read_u32(r)?;
            let int_value = read_i32(r)?;
            let float_value = read_f32(r)?;

            match sub_tag {
                NUMBER_INT => NodeKind::Int(int_value),
                NUMBER_FLOAT => NodeKind::Float(float_value),
                _ => return Err(invalid_data("unknown literal tag")),
            }
        },
        _ => return Err(invalid_data("unknown node tag")),
    };

    Ok(Node { kind, line })
}

fn invalid_data(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn write_u32<W: Write>(w: &mut W, value: u32) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

fn write_u64<W: Write>(w: &mut W, value: u64) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

fn write_i32<W: Write>(w: &mut W, value: i32) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

fn write_f32<W: Write>(w: &mut W, value: f32) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

fn write_bool<W: Write>(w: &mut W, value: bool) -> io::Result<()> {
    w.write_all(&[u8::from(value)])
}

fn write_str<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    write_u64(w, s.len() as u64)?;
    w.write_all(s.as_bytes())
}

fn write_handles<W: Write>(w: &mut W, handles: &[NodeHandle]) -> io::Result<()> {
    write_u64(w, handles.len() as u64)?;
    for &handle in handles {
        write_u32(w, handle)?;
    }
    Ok(())
}

fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_f32<R: Read>(r: &mut R) -> io::Result<f32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

fn read_bool<R: Read>(r: &mut R) -> io::Result<bool> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0] != 0)
}

fn read_len<R: Read>(r: &mut R) -> io::Result<usize> {
    usize::try_from(read_u64(r)?).map_err(|_| invalid_data("length prefix out of range"))
}

fn read_str<R: Read>(r: &mut R) -> io::Result<String> {
    let len = read_u64(r)?;
    let mut buf = Vec::new();
    r.take(len).read_to_end(&mut buf)?;
    if buf.len() as u64 != len {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    String::from_utf8(buf).map_err(|_| invalid_data("string is not valid UTF-8"))
}

fn read_handles<R: Read>(r: &mut R) -> io::Result<Vec<NodeHandle>> {
    let len = read_len(r)?;
    let mut handles = Vec::new();
    for _ in 0..len {
        handles.push(read_u32(r)?);
    }
    Ok(handles)
}
