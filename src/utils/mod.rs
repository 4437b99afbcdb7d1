pub fn set_bit(data:&mut u8, bit_position:u8) {
    *data |= 1 << bit_position;
}

pub fn clear_bit(data:&mut u8, bit_position:u8) {
    *data &= 0xFF ^ (1 << bit_position);
}

pub fn get_bit(data:&u8, bit_position:u8) -> bool {
    if (data & (1 << bit_position)) > 0 {
        true
    } else {
        false
    }
}
