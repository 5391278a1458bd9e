/// Precompute the result of a tilable computation
/// for faster memory access by row.
///
/// `map(x, y, idx)` is evaluated for every `x < row_size`, `y < tile_size`,
/// `idx` being the row-major index in the returned buffer.
///
/// > A(x, y) * B(n, m) -> C(x, m)
#[inline(always)]
pub fn precompute_tiled_rows<T, MapFn>(tile_size: usize, row_size: usize, map: MapFn) -> Vec<T>
where
    MapFn: Fn(usize, usize, usize) -> T,
{
    let mut cache = Vec::with_capacity(tile_size * row_size);
    for y in 0..tile_size {
        for x in 0..row_size {
            let idx = cache.len();
            cache.push(map(x, y, idx));
        }
    }
    cache
}

#[cfg(test)]
mod tests {
    use super::precompute_tiled_rows;

    #[test]
    fn test_precompute_tiled_rows_simple() {
        let buf = precompute_tiled_rows(5, 10, |x, y, idx| (x, y, idx));
        assert_eq!(buf.len(), 5 * 10);

        let mut idx = 0;
        for y in 0..5 {
            for x in 0..10 {
                assert_eq!(buf[idx], (x, y, idx));
                idx += 1;
            }
        }
    }

    #[test]
    fn test_precompute_tiled_rows_repeats_pattern() {
        let pattern = [1, 2, 3, 4];
        let buf = precompute_tiled_rows(2, 5, |x, y, _| pattern[y * 2 + x % 2]);
        assert_eq!(buf, vec![1, 2, 1, 2, 1, 3, 4, 3, 4, 3]);
    }

    #[test]
    fn test_precompute_tiled_rows_empty() {
        assert!(precompute_tiled_rows(3, 0, |_, _, _| 0u8).is_empty());
    }
}
