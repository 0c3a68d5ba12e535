//! Interpreting Type 2 charstrings into outlines.
//!
//! The interpreter state lives in [`State`] and is threaded through calls to
//! local and global subroutines explicitly, so a subroutine call is just a
//! nested run over a different byte span.

use std::fmt::{self, Display, Formatter};

use super::argstack::ArgumentsStack;
use super::index::Index;
use super::number::Number;
use super::subroutines::SubroutineHandler;
use crate::glyph::{Command, Point};
use crate::read::Reader;

/// Type 2 limit on nested subroutine calls.
const STACK_LIMIT: u8 = 10;

/// Operators as defined in Adobe Technical Note #5177.
mod operator {
    pub const HORIZONTAL_STEM: u8 = 1;
    pub const VERTICAL_STEM: u8 = 3;
    pub const VERTICAL_MOVE_TO: u8 = 4;
    pub const LINE_TO: u8 = 5;
    pub const HORIZONTAL_LINE_TO: u8 = 6;
    pub const VERTICAL_LINE_TO: u8 = 7;
    pub const CURVE_TO: u8 = 8;
    pub const CALL_LOCAL_SUBROUTINE: u8 = 10;
    pub const RETURN: u8 = 11;
    pub const TWO_BYTE_OPERATOR_MARK: u8 = 12;
    pub const ENDCHAR: u8 = 14;
    pub const HORIZONTAL_STEM_HINT_MASK: u8 = 18;
    pub const HINT_MASK: u8 = 19;
    pub const COUNTER_MASK: u8 = 20;
    pub const MOVE_TO: u8 = 21;
    pub const HORIZONTAL_MOVE_TO: u8 = 22;
    pub const VERTICAL_STEM_HINT_MASK: u8 = 23;
    pub const CURVE_LINE: u8 = 24;
    pub const LINE_CURVE: u8 = 25;
    pub const VV_CURVE_TO: u8 = 26;
    pub const HH_CURVE_TO: u8 = 27;
    pub const SHORT_INT: u8 = 28;
    pub const CALL_GLOBAL_SUBROUTINE: u8 = 29;
    pub const VH_CURVE_TO: u8 = 30;
    pub const HV_CURVE_TO: u8 = 31;

    // Two-byte operators after the 12 escape.
    pub const HFLEX: u8 = 34;
    pub const FLEX: u8 = 35;
    pub const HFLEX1: u8 = 36;
    pub const FLEX1: u8 = 37;
}

/// Why a charstring could not be interpreted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CharStringError {
    /// The program ended in the middle of an operand or hint mask.
    ReadOutOfBounds,
    /// A reserved or unsupported operator. Two-byte operators are reported as
    /// `1200 + second byte`.
    InvalidOperator(u16),
    /// An operator got a number of operands it cannot work with.
    InvalidArgumentsStackLength,
    /// An operator needed more operands than were on the stack.
    StackUnderflow,
    /// More than 48 operands were pushed.
    StackOverflow,
    /// Subroutines were nested more than 10 levels deep.
    NestingLimitReached,
    /// A subroutine call referred to a subroutine that does not exist.
    InvalidSubroutineIndex,
    /// Drawing started before the first moveto.
    MissingMoveTo,
    /// The program did not end with `endchar`.
    MissingEndChar,
    /// `endchar` asked for an accented composite glyph.
    Seac,
}

impl Display for CharStringError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::ReadOutOfBounds => f.pad("unexpected end of charstring"),
            Self::InvalidOperator(op) => write!(f, "invalid operator {op}"),
            Self::InvalidArgumentsStackLength => f.pad("wrong number of operands"),
            Self::StackUnderflow => f.pad("operand stack underflow"),
            Self::StackOverflow => f.pad("operand stack overflow"),
            Self::NestingLimitReached => f.pad("subroutines nested too deeply"),
            Self::InvalidSubroutineIndex => f.pad("invalid subroutine index"),
            Self::MissingMoveTo => f.pad("drawing before the first moveto"),
            Self::MissingEndChar => f.pad("missing endchar"),
            Self::Seac => f.pad("seac accent composition is not supported"),
        }
    }
}

impl std::error::Error for CharStringError {}

/// Everything a charstring may refer to outside of itself.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub global_subrs: &'a Index,
    pub local_subrs: &'a Index,
    pub default_width: f32,
    pub nominal_width: f32,
}

/// The result of running a glyph's charstring.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub path: Vec<Command>,
    pub advance: f32,
}

/// The state of one glyph's interpretation.
#[derive(Debug, Default)]
struct State {
    stack: ArgumentsStack,
    x: f32,
    y: f32,
    /// Whether a subpath is open and must be closed before the next one.
    open: bool,
    has_move_to: bool,
    width_parsed: bool,
    width: Option<f32>,
    stems_len: u32,
    has_endchar: bool,
    path: Vec<Command>,
}

impl State {
    /// Consume the width operand in front of the regular operands if this is
    /// the first stack-clearing operator and `has_width` says one is present.
    /// Returns the index of the first regular operand.
    fn parse_width(&mut self, ctx: &Context, has_width: bool) -> usize {
        if self.width_parsed {
            return 0;
        }

        self.width_parsed = true;
        if has_width && !self.stack.is_empty() {
            self.width = Some(ctx.nominal_width + self.stack.at(0));
            1
        } else {
            0
        }
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.close();
        self.x = x;
        self.y = y;
        self.open = true;
        self.has_move_to = true;
        self.path.push(Command::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.path.push(Command::LineTo(Point::new(x, y)));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.path.push(Command::CubicCurveTo(
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x, y),
        ));
    }

    fn close(&mut self) {
        if self.open {
            self.path.push(Command::ClosePath);
            self.open = false;
        }
    }

    fn require_move_to(&self) -> Result<(), CharStringError> {
        if self.has_move_to {
            Ok(())
        } else {
            Err(CharStringError::MissingMoveTo)
        }
    }

    fn count_stems(&mut self, ctx: &Context) {
        let len = self.stack.len();
        let start = self.parse_width(ctx, len % 2 == 1);
        self.stems_len += ((len - start) >> 1) as u32;
        self.stack.clear();
    }
}

/// Interpret the charstring `program`.
pub fn interpret(ctx: &Context, program: &[u8]) -> Result<Outline, CharStringError> {
    let mut state = State { stack: ArgumentsStack::new(), ..State::default() };
    execute(ctx, &mut state, program, 0)?;

    if !state.has_endchar {
        return Err(CharStringError::MissingEndChar);
    }

    Ok(Outline { path: state.path, advance: state.width.unwrap_or(ctx.default_width) })
}

fn call_subroutine(
    ctx: &Context,
    state: &mut State,
    subroutines: &Index,
    depth: u8,
) -> Result<(), CharStringError> {
    if depth == STACK_LIMIT {
        return Err(CharStringError::NestingLimitReached);
    }

    let index = state.stack.pop()?;
    let program = SubroutineHandler::new(subroutines)
        .get_with_biased(index)
        .ok_or(CharStringError::InvalidSubroutineIndex)?;
    execute(ctx, state, program, depth + 1)
}

fn execute(
    ctx: &Context,
    state: &mut State,
    program: &[u8],
    depth: u8,
) -> Result<(), CharStringError> {
    use operator::*;

    let mut r = Reader::new(program);
    while !r.at_end() {
        let op = r.peak::<u8>().ok_or(CharStringError::ReadOutOfBounds)?;
        if op == SHORT_INT || op >= 32 {
            let n = Number::parse_char_string_number(&mut r)
                .ok_or(CharStringError::ReadOutOfBounds)?;
            state.stack.push(n.as_f32())?;
            continue;
        }

        r.skip_bytes(1);
        match op {
            HORIZONTAL_STEM | VERTICAL_STEM | HORIZONTAL_STEM_HINT_MASK
            | VERTICAL_STEM_HINT_MASK => {
                // y dy {dya dyb}* hstem
                // x dx {dxa dxb}* vstem
                state.count_stems(ctx);
            }
            HINT_MASK | COUNTER_MASK => {
                // Operands left on the stack are implicit vstem hints.
                state.count_stems(ctx);
                let len = ((state.stems_len + 7) >> 3) as usize;
                r.skip_bytes(len).ok_or(CharStringError::ReadOutOfBounds)?;
            }
            MOVE_TO => {
                // dx1 dy1
                let i = state.parse_width(ctx, state.stack.len() == 3);
                if state.stack.len() - i != 2 {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                let (x, y) = (state.x + state.stack.at(i), state.y + state.stack.at(i + 1));
                state.move_to(x, y);
                state.stack.clear();
            }
            HORIZONTAL_MOVE_TO | VERTICAL_MOVE_TO => {
                // dx1 or dy1
                let i = state.parse_width(ctx, state.stack.len() == 2);
                if state.stack.len() - i != 1 {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                let d = state.stack.at(i);
                if op == HORIZONTAL_MOVE_TO {
                    state.move_to(state.x + d, state.y);
                } else {
                    state.move_to(state.x, state.y + d);
                }
                state.stack.clear();
            }
            LINE_TO => {
                // {dxa dya}+
                state.require_move_to()?;
                let args = state.stack.pop_all();
                if args.is_empty() || args.len() % 2 != 0 {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                for pair in args.chunks(2) {
                    state.line_to(state.x + pair[0], state.y + pair[1]);
                }
            }
            HORIZONTAL_LINE_TO | VERTICAL_LINE_TO => {
                // dx1 {dya dxb}*  or  dy1 {dxa dyb}*
                state.require_move_to()?;
                let args = state.stack.pop_all();
                if args.is_empty() {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                let mut horizontal = op == HORIZONTAL_LINE_TO;
                for d in args {
                    if horizontal {
                        state.line_to(state.x + d, state.y);
                    } else {
                        state.line_to(state.x, state.y + d);
                    }
                    horizontal = !horizontal;
                }
            }
            CURVE_TO => {
                // {dxa dya dxb dyb dxc dyc}+
                state.require_move_to()?;
                let args = state.stack.pop_all();
                if args.is_empty() || args.len() % 6 != 0 {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                for c in args.chunks(6) {
                    curve(state, c);
                }
            }
            CURVE_LINE => {
                // {dxa dya dxb dyb dxc dyc}+ dxd dyd
                state.require_move_to()?;
                let args = state.stack.pop_all();
                if args.len() < 8 || (args.len() - 2) % 6 != 0 {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                let (curves, line) = args.split_at(args.len() - 2);
                for c in curves.chunks(6) {
                    curve(state, c);
                }
                state.line_to(state.x + line[0], state.y + line[1]);
            }
            LINE_CURVE => {
                // {dxa dya}+ dxb dyb dxc dyc dxd dyd
                state.require_move_to()?;
                let args = state.stack.pop_all();
                if args.len() < 8 || (args.len() - 6) % 2 != 0 {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                let (lines, c) = args.split_at(args.len() - 6);
                for pair in lines.chunks(2) {
                    state.line_to(state.x + pair[0], state.y + pair[1]);
                }
                curve(state, c);
            }
            VV_CURVE_TO => {
                // dx1? {dya dxb dyb dyc}+
                state.require_move_to()?;
                let args = state.stack.pop_all();
                let (dx1, rest) = split_odd(&args);
                if rest.is_empty() || rest.len() % 4 != 0 {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                let mut x = state.x + dx1;
                for c in rest.chunks(4) {
                    let y1 = state.y + c[0];
                    let x2 = x + c[1];
                    let y2 = y1 + c[2];
                    state.curve_to(x, y1, x2, y2, x2, y2 + c[3]);
                    x = state.x;
                }
            }
            HH_CURVE_TO => {
                // dy1? {dxa dxb dyb dxc}+
                state.require_move_to()?;
                let args = state.stack.pop_all();
                let (dy1, rest) = split_odd(&args);
                if rest.is_empty() || rest.len() % 4 != 0 {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                let mut y = state.y + dy1;
                for c in rest.chunks(4) {
                    let x1 = state.x + c[0];
                    let x2 = x1 + c[1];
                    let y2 = y + c[2];
                    state.curve_to(x1, y, x2, y2, x2 + c[3], y2);
                    y = state.y;
                }
            }
            VH_CURVE_TO | HV_CURVE_TO => {
                // dy1 dx2 dy2 dx3 {dxa dxb dyb dyc dyd dxe dye dxf}* dyf?
                // dx1 dx2 dy2 dy3 {dya dxb dyb dxc dxd dxe dye dyf}* dxf?
                state.require_move_to()?;
                let args = state.stack.pop_all();
                if args.len() < 4 || !matches!(args.len() % 8, 0 | 1 | 4 | 5) {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                }

                let mut horizontal = op == HV_CURVE_TO;
                let mut i = 0;
                while i + 4 <= args.len() {
                    let c = &args[i..i + 4];
                    // The trailing odd operand belongs to the last curve.
                    let last = if i + 5 == args.len() { args[i + 4] } else { 0.0 };
                    if horizontal {
                        let x1 = state.x + c[0];
                        let x2 = x1 + c[1];
                        let y2 = state.y + c[2];
                        let y = y2 + c[3];
                        state.curve_to(x1, state.y, x2, y2, x2 + last, y);
                    } else {
                        let y1 = state.y + c[0];
                        let x2 = state.x + c[1];
                        let y2 = y1 + c[2];
                        let x = x2 + c[3];
                        state.curve_to(state.x, y1, x2, y2, x, y2 + last);
                    }
                    horizontal = !horizontal;
                    i += 4;
                }
            }
            CALL_LOCAL_SUBROUTINE => {
                call_subroutine(ctx, state, ctx.local_subrs, depth)?;
                if state.has_endchar {
                    break;
                }
            }
            CALL_GLOBAL_SUBROUTINE => {
                call_subroutine(ctx, state, ctx.global_subrs, depth)?;
                if state.has_endchar {
                    break;
                }
            }
            RETURN => break,
            ENDCHAR => {
                let len = state.stack.len();
                if len == 4 || (len == 5 && !state.width_parsed) {
                    return Err(CharStringError::Seac);
                }

                state.parse_width(ctx, len == 1);
                state.stack.clear();
                state.close();
                state.has_endchar = true;
                break;
            }
            TWO_BYTE_OPERATOR_MARK => {
                let op2 = r.read::<u8>().ok_or(CharStringError::ReadOutOfBounds)?;
                flex(state, op2)?;
            }
            // 0, 2, 9, 13, 15, 16 and 17 are reserved.
            _ => return Err(CharStringError::InvalidOperator(op.into())),
        }
    }

    Ok(())
}

/// One `rrcurveto` segment from six relative operands.
fn curve(state: &mut State, c: &[f32]) {
    let x1 = state.x + c[0];
    let y1 = state.y + c[1];
    let x2 = x1 + c[2];
    let y2 = y1 + c[3];
    state.curve_to(x1, y1, x2, y2, x2 + c[4], y2 + c[5]);
}

/// Split off a leading operand if the count is odd.
fn split_odd(args: &[f32]) -> (f32, &[f32]) {
    match args.split_first() {
        Some((&first, rest)) if args.len() % 2 == 1 => (first, rest),
        _ => (0.0, args),
    }
}

/// The flex family: each draws two curves, flex depth hints are ignored.
fn flex(state: &mut State, op: u8) -> Result<(), CharStringError> {
    use operator::*;

    let expected = match op {
        HFLEX => 7,
        FLEX => 13,
        HFLEX1 => 9,
        FLEX1 => 11,
        _ => return Err(CharStringError::InvalidOperator(1200 + u16::from(op))),
    };

    state.require_move_to()?;
    let s = state.stack.pop_all();
    if s.len() != expected {
        return Err(CharStringError::InvalidArgumentsStackLength);
    }

    let (x, y) = (state.x, state.y);
    match op {
        HFLEX => {
            // dx1 dx2 dy2 dx3 dx4 dx5 dx6
            let x1 = x + s[0];
            let x2 = x1 + s[1];
            let y2 = y + s[2];
            let x3 = x2 + s[3];
            let x4 = x3 + s[4];
            let x5 = x4 + s[5];
            state.curve_to(x1, y, x2, y2, x3, y2);
            state.curve_to(x4, y2, x5, y, x5 + s[6], y);
        }
        FLEX => {
            // dx1 dy1 dx2 dy2 dx3 dy3 dx4 dy4 dx5 dy5 dx6 dy6 fd
            curve(state, &s[0..6]);
            curve(state, &s[6..12]);
        }
        HFLEX1 => {
            // dx1 dy1 dx2 dy2 dx3 dx4 dx5 dy5 dx6
            let x1 = x + s[0];
            let y1 = y + s[1];
            let x2 = x1 + s[2];
            let y2 = y1 + s[3];
            let x3 = x2 + s[4];
            let x4 = x3 + s[5];
            let x5 = x4 + s[6];
            let y5 = y2 + s[7];
            state.curve_to(x1, y1, x2, y2, x3, y2);
            state.curve_to(x4, y2, x5, y5, x5 + s[8], y);
        }
        _ => {
            // dx1 dy1 dx2 dy2 dx3 dy3 dx4 dy4 dx5 dy5 d6
            let x1 = x + s[0];
            let y1 = y + s[1];
            let x2 = x1 + s[2];
            let y2 = y1 + s[3];
            let x3 = x2 + s[4];
            let y3 = y2 + s[5];
            let x4 = x3 + s[6];
            let y4 = y3 + s[7];
            let x5 = x4 + s[8];
            let y5 = y4 + s[9];

            // The last operand moves along the dominant axis of the flex.
            let (x6, y6) = if (x5 - x).abs() > (y5 - y).abs() {
                (x5 + s[10], y)
            } else {
                (x, y5 + s[10])
            };

            state.curve_to(x1, y1, x2, y2, x3, y3);
            state.curve_to(x4, y4, x5, y5, x6, y6);
        }
    }

    Ok(())
}
