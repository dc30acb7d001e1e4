// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

pub fn allocate_array<T: Clone + Default>(elements: usize) -> Vec<T> {
    vec![T::default(); elements]
}

#[test]
fn test_allocate_array() {
    assert_eq!(allocate_array::<u32>(2), vec![0u32; 2]);
    assert!(allocate_array::<u8>(0).is_empty());
}
