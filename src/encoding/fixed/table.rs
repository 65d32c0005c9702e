use crate::encoding::{
    fixed::Fixed, Charset, Checkpoint, Codec, CodecError, Compat, Cursor, CursorMut,
    RegistryBuilder, Stateless, Unit, UnitWidth,
};

fixed_codecs! {
    // ASCII and the ISO-8859 family
    US_ASCII: u8, Ascii;
    ISO_8859_1: u8, Iso8859Common;
    ISO_8859_2: u8, Iso8859Common;
    ISO_8859_3: u8, Iso8859Common;
    ISO_8859_4: u8, Iso8859Common;
    ISO_8859_5: u8, Iso8859Common;
    ISO_8859_6: u8, Iso8859Common;
    ISO_8859_7: u8, Iso8859Common;
    ISO_8859_8: u8, Iso8859Common;
    ISO_8859_9: u8, Iso8859Common;
    ISO_8859_10: u8, Iso8859Common;
    ISO_8859_13: u8, Iso8859Common;
    ISO_8859_14: u8, Iso8859Common;
    ISO_8859_15: u8, Iso8859Common;
    ISO_8859_16: u8, Iso8859Common;

    // ISO-646 national variants replace some ASCII punctuation
    ISO646_GB: u8, None;
    ISO646_SE2: u8, None;
    ISO646_IT: u8, None;
    ISO646_ES: u8, None;
    ISO646_DE: u8, None;
    ISO646_NO: u8, None;
    ISO646_FR: u8, None;
    ISO646_SE: u8, None;
    ISO646_PT: u8, None;
    ISO646_FR1: u8, None;
    ISO646_NO2: u8, None;
    ISO646_PT2: u8, None;
    ISO646_ES2: u8, None;
    ISO646_HU: u8, None;
    ISO646_JP_OCR_B: u8, None;
    ISO646_CA: u8, None;
    ISO646_CA2: u8, None;
    ISO646_YU: u8, None;
    ISO646_CU: u8, None;
    ISO646_DK: u8, None;
    ISO646_KR: u8, None;

    // Code pages; their real mappings are supplied through `Mapped`.
    // Windows-936 (GBK) is multibyte and has no row here.
    IBM037: u8, None;
    IBM038: u8, None;
    PTCP154: u8, None;
    IBM273: u8, None;
    IBM274: u8, None;
    IBM275: u8, None;
    IBM277: u8, None;
    IBM278: u8, None;
    IBM280: u8, None;
    IBM281: u8, None;
    IBM284: u8, None;
    IBM285: u8, None;
    IBM290: u8, None;
    IBM297: u8, None;
    IBM420: u8, None;
    IBM423: u8, None;
    IBM424: u8, None;
    IBM437: u8, None;
    IBM500: u8, None;
    IBM775: u8, None;
    IBM850: u8, None;
    IBM851: u8, None;
    IBM852: u8, None;
    IBM855: u8, None;
    IBM857: u8, None;
    IBM860: u8, None;
    IBM861: u8, None;
    IBM862: u8, None;
    IBM863: u8, None;
    IBM864: u8, None;
    IBM865: u8, None;
    IBM866: u8, None;
    IBM868: u8, None;
    IBM869: u8, None;
    IBM870: u8, None;
    IBM871: u8, None;
    IBM880: u8, None;
    IBM891: u8, None;
    IBM903: u8, None;
    IBM904: u8, None;
    IBM905: u8, None;
    IBM918: u8, None;
    IBM1026: u8, None;
    IBM1047: u8, None;
    Windows_1250: u8, None;
    Windows_1251: u8, None;
    Windows_1252: u8, None;
    Windows_1253: u8, None;
    Windows_1254: u8, None;
    Windows_1255: u8, None;
    Windows_1256: u8, None;
    Windows_1257: u8, None;
    Windows_1258: u8, None;
    IBM00858: u8, None;
    IBM00924: u8, None;
    IBM01140: u8, None;
    IBM01141: u8, None;
    IBM01142: u8, None;
    IBM01143: u8, None;
    IBM01144: u8, None;
    IBM01145: u8, None;
    IBM01146: u8, None;
    IBM01147: u8, None;
    IBM01148: u8, None;
    IBM01149: u8, None;

    // KOI8
    KOI8_E: u8, Ascii;
    KOI8_R: u8, Ascii;
    KOI8_U: u8, Ascii;

    // Fixed-width Unicode. Units 0..=160 are those code points, so both
    // count as ISO-8859 common supersets.
    UCS_2: u16, Iso8859Common;
    UCS_4: u32, Iso8859Common;
}
