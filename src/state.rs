use crate::{
    command::State,
    config::{DisplayGeometry, LineCount},
};

/// Base "set DDRAM address" command byte of every visible row
///
/// 4 row displays are two 2 row displays glued together: rows 3 and 4
/// continue rows 1 and 2 in controller memory, `columns` cells further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowAddressTable {
    addrs: [u8; 4],
    len: usize,
}

impl RowAddressTable {
    pub(crate) fn new(geometry: &DisplayGeometry) -> Self {
        let columns = geometry.columns();

        // DisplayGeometry::new keeps every row base inside a byte
        match geometry.lines() {
            LineCount::One => Self {
                addrs: [0x80, 0, 0, 0],
                len: 1,
            },
            LineCount::Two => Self {
                addrs: [0x80, 0xC0, 0, 0],
                len: 2,
            },
            LineCount::Four => Self {
                addrs: [0x80, 0xC0, 0x80 + columns, 0xC0 + columns],
                len: 4,
            },
        }
    }

    /// Base byte of a 1-based row
    pub(crate) fn get(&self, row: usize) -> Option<u8> {
        row.checked_sub(1)
            .and_then(|index| self.as_slice().get(index))
            .copied()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.addrs[..self.len]
    }
}

pub(crate) struct LcdState {
    geometry: DisplayGeometry,
    rows: RowAddressTable,
    backlight: State,
}

impl LcdState {
    pub(crate) fn new(geometry: DisplayGeometry) -> Self {
        Self {
            rows: RowAddressTable::new(&geometry),
            geometry,
            backlight: State::On,
        }
    }

    pub(crate) fn get_geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    pub(crate) fn get_row_addresses(&self) -> &RowAddressTable {
        &self.rows
    }

    pub(crate) fn get_backlight(&self) -> State {
        self.backlight
    }

    pub(crate) fn get_line_count(&self) -> u8 {
        self.geometry.lines().get()
    }

    pub(crate) fn get_line_capacity(&self) -> u8 {
        self.geometry.columns()
    }
}
