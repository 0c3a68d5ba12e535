use crate::read::{Readable, Reader};
use crate::{Error, Result};

/// A value with an optional device table adjusting it per pixel size.
///
/// Device tables are never resolved, the offset is kept as found.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct MathValueRecord {
    /// The value in design units.
    pub value: i16,
    /// Offset to a device table, from the start of the enclosing table.
    pub device_offset: u16,
}

impl Readable<'_> for MathValueRecord {
    const SIZE: usize = 4;

    fn read(r: &mut Reader) -> Option<Self> {
        Some(Self { value: r.read()?, device_offset: r.read()? })
    }
}

/// Declares the constants struct together with a parser that reads the fields
/// in declaration order.
macro_rules! constants {
    ($($(#[$attr:meta])* $field:ident: $ty:ty,)*) => {
        /// Global layout constants of a math font.
        #[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
        pub struct MathConstants {
            $($(#[$attr])* pub $field: $ty,)*
        }

        impl MathConstants {
            /// The size of the table in bytes.
            pub const SIZE: usize = 0 $(+ <$ty as Readable<'static>>::SIZE)*;

            /// Parse the constants at `offset` in the MATH table.
            pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
                let mut r = Reader::new_at(data, offset);
                Ok(Self {
                    $($field: r.read().ok_or(Error::MissingData)?,)*
                })
            }
        }
    };
}

constants! {
    /// Scale of level 1 scripts in percent.
    script_percent_scale_down: i16,
    /// Scale of level 2 scripts in percent.
    script_script_percent_scale_down: i16,
    /// Minimum height of a delimited expression to be treated as a sub-formula.
    delimited_sub_formula_min_height: u16,
    /// Minimum height of n-ary operators in display style.
    display_operator_min_height: u16,
    /// White space between math formulas.
    math_leading: MathValueRecord,
    /// Height of the math axis above the baseline.
    axis_height: MathValueRecord,
    /// Maximum height of an accent base that does not need raised accents.
    accent_base_height: MathValueRecord,
    /// Maximum height of an accent base that does not need flattened accents.
    flattened_accent_base_height: MathValueRecord,
    /// Standard shift down of subscripts.
    subscript_shift_down: MathValueRecord,
    /// Maximum height of the top of a subscript.
    subscript_top_max: MathValueRecord,
    /// Minimum drop of the subscript baseline below the base's bottom.
    subscript_baseline_drop_min: MathValueRecord,
    /// Standard shift up of superscripts.
    superscript_shift_up: MathValueRecord,
    /// Standard shift up of superscripts in cramped style.
    superscript_shift_up_cramped: MathValueRecord,
    /// Minimum height of the bottom of a superscript.
    superscript_bottom_min: MathValueRecord,
    /// Maximum drop of the superscript baseline below the base's top.
    superscript_baseline_drop_max: MathValueRecord,
    /// Minimum gap between a subscript and a superscript.
    sub_superscript_gap_min: MathValueRecord,
    /// Maximum height of a superscript's bottom when a subscript is present.
    superscript_bottom_max_with_subscript: MathValueRecord,
    /// Extra space after a script.
    space_after_script: MathValueRecord,
    /// Minimum gap between an upper limit and the operator.
    upper_limit_gap_min: MathValueRecord,
    /// Minimum rise of an upper limit's baseline above the operator.
    upper_limit_baseline_rise_min: MathValueRecord,
    /// Minimum gap between a lower limit and the operator.
    lower_limit_gap_min: MathValueRecord,
    /// Minimum drop of a lower limit's baseline below the operator.
    lower_limit_baseline_drop_min: MathValueRecord,
    /// Standard shift up of the top element of a stack.
    stack_top_shift_up: MathValueRecord,
    /// Shift up of the top element of a stack in display style.
    stack_top_display_style_shift_up: MathValueRecord,
    /// Standard shift down of the bottom element of a stack.
    stack_bottom_shift_down: MathValueRecord,
    /// Shift down of the bottom element of a stack in display style.
    stack_bottom_display_style_shift_down: MathValueRecord,
    /// Minimum gap between the elements of a stack.
    stack_gap_min: MathValueRecord,
    /// Minimum gap between the elements of a stack in display style.
    stack_display_style_gap_min: MathValueRecord,
    /// Standard shift up of the top element of a stretch stack.
    stretch_stack_top_shift_up: MathValueRecord,
    /// Standard shift down of the bottom element of a stretch stack.
    stretch_stack_bottom_shift_down: MathValueRecord,
    /// Minimum gap above the stretched element.
    stretch_stack_gap_above_min: MathValueRecord,
    /// Minimum gap below the stretched element.
    stretch_stack_gap_below_min: MathValueRecord,
    /// Standard shift up of a numerator.
    fraction_numerator_shift_up: MathValueRecord,
    /// Shift up of a numerator in display style.
    fraction_numerator_display_style_shift_up: MathValueRecord,
    /// Standard shift down of a denominator.
    fraction_denominator_shift_down: MathValueRecord,
    /// Shift down of a denominator in display style.
    fraction_denominator_display_style_shift_down: MathValueRecord,
    /// Minimum gap between a numerator and the fraction bar.
    fraction_numerator_gap_min: MathValueRecord,
    /// Minimum gap between a numerator and the fraction bar in display style.
    fraction_num_display_style_gap_min: MathValueRecord,
    /// Thickness of the fraction bar.
    fraction_rule_thickness: MathValueRecord,
    /// Minimum gap between a denominator and the fraction bar.
    fraction_denominator_gap_min: MathValueRecord,
    /// Minimum gap between a denominator and the fraction bar in display style.
    fraction_denom_display_style_gap_min: MathValueRecord,
    /// Horizontal gap between the parts of a skewed fraction.
    skewed_fraction_horizontal_gap: MathValueRecord,
    /// Vertical gap between the parts of a skewed fraction.
    skewed_fraction_vertical_gap: MathValueRecord,
    /// Gap between an overbar and its base.
    overbar_vertical_gap: MathValueRecord,
    /// Thickness of an overbar.
    overbar_rule_thickness: MathValueRecord,
    /// Space reserved above an overbar.
    overbar_extra_ascender: MathValueRecord,
    /// Gap between an underbar and its base.
    underbar_vertical_gap: MathValueRecord,
    /// Thickness of an underbar.
    underbar_rule_thickness: MathValueRecord,
    /// Space reserved below an underbar.
    underbar_extra_descender: MathValueRecord,
    /// Gap between a radicand and the radical bar.
    radical_vertical_gap: MathValueRecord,
    /// Gap between a radicand and the radical bar in display style.
    radical_display_style_vertical_gap: MathValueRecord,
    /// Thickness of the radical bar.
    radical_rule_thickness: MathValueRecord,
    /// Space reserved above the radical bar.
    radical_extra_ascender: MathValueRecord,
    /// Kern before the degree of a radical.
    radical_kern_before_degree: MathValueRecord,
    /// Kern after the degree of a radical.
    radical_kern_after_degree: MathValueRecord,
    /// Height of the bottom of a radical degree, in percent of the radical's
    /// ascender.
    radical_degree_bottom_raise_percent: i16,
}
