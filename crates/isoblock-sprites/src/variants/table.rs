//! Static atlas tile assignments for plain block kinds.

use crate::sprite::BlockKind;

/// Top-face atlas tile per block kind; `-1` marks kinds without a plain sprite.
#[rustfmt::skip]
pub const TOP_IDS: [i16; 92] = [
    //  0    1    2    3    4    5    6    7    8    9   10   11   12   13   14   15
       -1,   1,   0,   2,  16,   4,  -1,  17, 205, 205, 237, 237,  18,  19,  32,  33,
    // 16   17   18   19   20   21   22   23   24   25   26   27   28   29   30   31
       34,  -1,  52,  48,  49, 160, 144,  -1, 176,  74,  -1,  -1,  -1,  -1,  -1,  -1,
    // 32   33   34   35   36   37   38   39   40   41   42   43   44   45   46   47
       -1,  -1,  -1,  -1,  -1,  13,  12,  29,  28,  23,  22,  -1,  -1,   7,   8,  35,
    // 48   49   50   51   52   53   54   55   56   57   58   59   60   61   62   63
       36,  37,  -1,  -1,  65,  -1,  25,  -1,  98,  24,  -1,  -1,  86,  -1,  -1,  -1,
    // 64   65   66   67   68   69   70   71   72   73   74   75   76   77   78   79
       -1,  -1,  -1,  -1,  -1,  -1,  -1,  -1,  -1,  51,  51,  -1,  -1,  -1,  66,  67,
    // 80   81   82   83   84   85   86   87   88   89   90   91
       66,  69,  72,  73,  74,  -1, 102, 103, 104, 105,  -1, 102,
];

/// Side-face atlas tile per block kind; `-1` marks kinds without a plain sprite.
#[rustfmt::skip]
pub const SIDE_IDS: [i16; 92] = [
    //  0    1    2    3    4    5    6    7    8    9   10   11   12   13   14   15
       -1,   1,   3,   2,  16,   4,  -1,  17, 205, 205, 237, 237,  18,  19,  32,  33,
    // 16   17   18   19   20   21   22   23   24   25   26   27   28   29   30   31
       34,  -1,  52,  48,  49, 160, 144,  -1, 192,  74,  -1,  -1,  -1,  -1,  -1,  -1,
    // 32   33   34   35   36   37   38   39   40   41   42   43   44   45   46   47
       -1,  -1,  -1,  -1,  -1,  13,  12,  29,  28,  23,  22,  -1,  -1,   7,   8,  35,
    // 48   49   50   51   52   53   54   55   56   57   58   59   60   61   62   63
       36,  37,  -1,  -1,  65,  -1,  25, 101,  98,  24,  -1,  -1,  86,  -1,  -1,  -1,
    // 64   65   66   67   68   69   70   71   72   73   74   75   76   77   78   79
       -1,  -1,  -1,  -1,  -1,  -1,  -1,  -1,  -1,  51,  51,  -1,  -1,  -1,  66,  67,
    // 80   81   82   83   84   85   86   87   88   89   90   91
       66,  69,  72,  73,  74,  -1, 118, 103, 104, 105,  -1, 118,
];

/// The `(top, side)` tiles of a plain kind, if both are assigned.
pub fn atlas_faces(kind: BlockKind) -> Option<(u8, u8)> {
    let index = kind.0 as usize;
    let top = u8::try_from(*TOP_IDS.get(index)?).ok()?;
    let side = u8::try_from(*SIDE_IDS.get(index)?).ok()?;
    Some((top, side))
}
