// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Word letters and canonical command codes.

use std::fmt;
use strum_macros::{Display, EnumIter};

/// The letter that starts a G-code word.
///
/// E, O, U, V and W are missing: they are not reserved by the RS274/NGC
/// grammar.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter)]
pub enum Code {
    A, B, C, D,
    F, G, H,
    I, J, K, L,
    M, N,
    P, Q, R, S, T,
    X, Y, Z,
}

impl Code {
    /// Maps an ASCII letter (either case) to its code, or `None` for
    /// letters outside the alphabet.
    pub fn from_letter(letter: char) -> Option<Code> {
        Some(match letter.to_ascii_uppercase() {
            'A' => Code::A,
            'B' => Code::B,
            'C' => Code::C,
            'D' => Code::D,
            'F' => Code::F,
            'G' => Code::G,
            'H' => Code::H,
            'I' => Code::I,
            'J' => Code::J,
            'K' => Code::K,
            'L' => Code::L,
            'M' => Code::M,
            'N' => Code::N,
            'P' => Code::P,
            'Q' => Code::Q,
            'R' => Code::R,
            'S' => Code::S,
            'T' => Code::T,
            'X' => Code::X,
            'Y' => Code::Y,
            'Z' => Code::Z,
            _ => return None,
        })
    }

    /// The uppercase ASCII letter for this code.
    pub fn letter(self) -> char {
        match self {
            Code::A => 'A',
            Code::B => 'B',
            Code::C => 'C',
            Code::D => 'D',
            Code::F => 'F',
            Code::G => 'G',
            Code::H => 'H',
            Code::I => 'I',
            Code::J => 'J',
            Code::K => 'K',
            Code::L => 'L',
            Code::M => 'M',
            Code::N => 'N',
            Code::P => 'P',
            Code::Q => 'Q',
            Code::R => 'R',
            Code::S => 'S',
            Code::T => 'T',
            Code::X => 'X',
            Code::Y => 'Y',
            Code::Z => 'Z',
        }
    }
}

/// A canonical (letter, number) command pair, e.g. G1 or M30.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CommandCode {
    pub code: Code,
    pub number: i32,
}

impl CommandCode {
    pub const RAPID_POSITION: CommandCode = CommandCode::new(Code::G, 0);
    pub const LINEAR_INTERPOLATION: CommandCode = CommandCode::new(Code::G, 1);
    pub const CIRCULAR_INTERPOLATION_CW: CommandCode = CommandCode::new(Code::G, 2);
    pub const CIRCULAR_INTERPOLATION_CCW: CommandCode = CommandCode::new(Code::G, 3);
    pub const XY_PLANE_SELECTION: CommandCode = CommandCode::new(Code::G, 17);
    pub const XZ_PLANE_SELECTION: CommandCode = CommandCode::new(Code::G, 18);
    pub const YZ_PLANE_SELECTION: CommandCode = CommandCode::new(Code::G, 19);
    pub const INCHES_SELECTION: CommandCode = CommandCode::new(Code::G, 20);
    pub const MILLIMETERS_SELECTION: CommandCode = CommandCode::new(Code::G, 21);
    pub const RETURN_HOME: CommandCode = CommandCode::new(Code::G, 28);
    pub const ABSOLUTE_MODE: CommandCode = CommandCode::new(Code::G, 90);
    pub const RELATIVE_MODE: CommandCode = CommandCode::new(Code::G, 91);
    pub const PROGRAM_STOP: CommandCode = CommandCode::new(Code::M, 0);
    pub const END_OF_PROGRAM: CommandCode = CommandCode::new(Code::M, 2);
    pub const SPINDLE_ON_CW: CommandCode = CommandCode::new(Code::M, 3);
    pub const SPINDLE_ON_CCW: CommandCode = CommandCode::new(Code::M, 4);
    pub const SPINDLE_STOP: CommandCode = CommandCode::new(Code::M, 5);
    pub const TOOL_CHANGE: CommandCode = CommandCode::new(Code::M, 6);
    pub const FLOOD_COOLANT_ON: CommandCode = CommandCode::new(Code::M, 8);
    pub const FLOOD_COOLANT_OFF: CommandCode = CommandCode::new(Code::M, 9);
    pub const END_OF_PROGRAM_AND_RESET: CommandCode = CommandCode::new(Code::M, 30);
    pub const START_EXTRUDER_HEATING: CommandCode = CommandCode::new(Code::M, 104);
    pub const SET_FAN_SPEED: CommandCode = CommandCode::new(Code::M, 106);
    pub const WAIT_EXTRUDER_TEMPERATURE: CommandCode = CommandCode::new(Code::M, 109);
    pub const START_BED_HEATING: CommandCode = CommandCode::new(Code::M, 140);
    pub const WAIT_BED_TEMPERATURE: CommandCode = CommandCode::new(Code::M, 190);

    pub const fn new(code: Code, number: i32) -> CommandCode {
        CommandCode { code, number }
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.code, self.number)
    }
}
