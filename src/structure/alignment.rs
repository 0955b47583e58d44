// Fri Oct 16 2026 - Alex

use crate::structure::{Field, Struct};

/// Smallest multiple of `alignment` that is `>= offset`.
///
/// Works for any alignment, not only powers of two, since byte sized cache
/// lines can be arbitrary. A zero alignment leaves the offset untouched.
pub fn align_up(offset: u64, alignment: u64) -> u64 {
    if alignment == 0 {
        return offset;
    }
    let y = offset + alignment - 1;
    y - y % alignment
}

/// Walks struct fields in their current order, calling `on_pad` with the gap
/// in front of every field and finally with the tail gap (field is `None`).
///
/// With `system_align == 0` every field sits at its natural alignment and the
/// tail is rounded to the max field alignment. Otherwise field alignment is
/// capped by `system_align` and the tail is rounded to `system_align` itself.
pub fn walk_struct<F>(st: &Struct, system_align: u64, mut on_pad: F)
where
    F: FnMut(u64, Option<&Field>),
{
    let mut offset = 0u64;
    let mut struct_align = 1u64;
    for field in &st.fields {
        let field_align = if system_align == 0 {
            field.align
        } else {
            field.align.min(system_align)
        };
        struct_align = struct_align.max(field_align);
        let aligned = align_up(offset, field_align.max(1));
        on_pad(aligned - offset, Some(field));
        offset = aligned + field.size;
    }
    if system_align > 0 {
        struct_align = system_align;
    }
    let aligned = align_up(offset, struct_align);
    on_pad(aligned - offset, None);
}
