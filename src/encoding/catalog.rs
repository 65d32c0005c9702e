use std::fmt;

use crate::encoding::CodecError;

macro_rules! charset_table {
    ($($variant:ident = $id:literal => [$($name:literal),+],)*) => {
        /// Identifier of a character set.
        ///
        /// The discriminants are stable: new charsets are appended with the
        /// next free id and existing ids are never reused or renumbered.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[allow(non_camel_case_types)]
        #[repr(u16)]
        pub enum Charset {
            $($variant = $id,)*
        }

        impl Charset {
            pub const ALL: &'static [Charset] = &[$(Charset::$variant,)*];

            pub fn aliases(&self) -> &'static [&'static str] {
                match *self {
                    $(Charset::$variant => &[$($name),+],)*
                }
            }

            pub fn from_id(id: u16) -> Option<Charset> {
                match id {
                    $($id => Some(Charset::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

charset_table! {
    // ASCII
    US_ASCII = 0 => ["US-ASCII", "ASCII", "ANSI_X3.4-1968", "646"],

    // ISO-8859
    ISO_8859_1 = 1 => ["ISO-8859-1", "ISO8859-1", "ISO_8859-1"],
    ISO_8859_2 = 2 => ["ISO-8859-2", "ISO8859-2", "ISO_8859-2"],
    ISO_8859_3 = 3 => ["ISO-8859-3", "ISO8859-3", "ISO_8859-3"],
    ISO_8859_4 = 4 => ["ISO-8859-4", "ISO8859-4", "ISO_8859-4"],
    ISO_8859_5 = 5 => ["ISO-8859-5", "ISO8859-5", "ISO_8859-5"],
    ISO_8859_6 = 6 => ["ISO-8859-6", "ISO8859-6", "ISO_8859-6"],
    ISO_8859_7 = 7 => ["ISO-8859-7", "ISO8859-7", "ISO_8859-7"],
    ISO_8859_8 = 8 => ["ISO-8859-8", "ISO8859-8", "ISO_8859-8"],
    ISO_8859_9 = 9 => ["ISO-8859-9", "ISO8859-9", "ISO_8859-9"],
    ISO_8859_10 = 10 => ["ISO-8859-10", "ISO8859-10", "ISO_8859-10"],
    ISO_8859_13 = 11 => ["ISO-8859-13", "ISO8859-13", "ISO_8859-13"],
    ISO_8859_14 = 12 => ["ISO-8859-14", "ISO8859-14", "ISO_8859-14"],
    ISO_8859_15 = 13 => ["ISO-8859-15", "ISO8859-15", "ISO_8859-15"],
    ISO_8859_16 = 14 => ["ISO-8859-16", "ISO8859-16", "ISO_8859-16"],

    // ISO-646 national variants
    ISO646_GB = 15 => ["BS_4730", "ISO646-GB"],
    ISO646_SE2 = 16 => ["SEN_850200_C", "ISO646-SE2"],
    ISO646_IT = 17 => ["IT", "ISO646-IT"],
    ISO646_ES = 18 => ["ES", "ISO646-ES"],
    ISO646_DE = 19 => ["DIN_66003", "ISO646-DE"],
    ISO646_NO = 20 => ["NS_4551-1", "ISO646-NO"],
    ISO646_FR = 21 => ["NF_Z_62-010", "ISO646-FR"],
    ISO646_SE = 22 => ["SEN_850200_B", "ISO646-SE"],
    ISO646_PT = 23 => ["PT", "ISO646-PT"],
    ISO646_FR1 = 24 => ["NF_Z_62-010_(1973)", "ISO646-FR1"],
    ISO646_NO2 = 25 => ["NS_4551-2", "ISO646-NO2"],
    ISO646_PT2 = 26 => ["PT2", "ISO646-PT2"],
    ISO646_ES2 = 27 => ["ES2", "ISO646-ES2"],
    ISO646_HU = 28 => ["MSZ_7795.3", "ISO646-HU"],
    ISO646_JP_OCR_B = 29 => ["JIS_C6229-1984-b", "ISO646-JP-OCR-B"],
    ISO646_CA = 30 => ["CSA_Z243.4-1985-1", "ISO646-CA"],
    ISO646_CA2 = 31 => ["CSA_Z243.4-1985-2", "ISO646-CA2"],
    ISO646_YU = 32 => ["JUS_I.B1.002", "ISO646-YU"],
    ISO646_CU = 33 => ["NC_NC00-10:81", "ISO646-CU"],
    ISO646_DK = 34 => ["DS_2089", "ISO646-DK"],
    ISO646_KR = 35 => ["KSC5636", "ISO646-KR"],

    // Code pages (EBCDIC, DOS, Windows)
    IBM037 = 36 => ["IBM037", "CP037"],
    IBM038 = 37 => ["IBM038", "CP038"],
    PTCP154 = 38 => ["PTCP154", "CP154"],
    IBM273 = 39 => ["IBM273", "CP273"],
    IBM274 = 40 => ["IBM274", "CP274"],
    IBM275 = 41 => ["IBM275", "CP275"],
    IBM277 = 42 => ["IBM277", "CP277"],
    IBM278 = 43 => ["IBM278", "CP278"],
    IBM280 = 44 => ["IBM280", "CP280"],
    IBM281 = 45 => ["IBM281", "CP281"],
    IBM284 = 46 => ["IBM284", "CP284"],
    IBM285 = 47 => ["IBM285", "CP285"],
    IBM290 = 48 => ["IBM290", "CP290"],
    IBM297 = 49 => ["IBM297", "CP297"],
    IBM420 = 50 => ["IBM420", "CP420"],
    IBM423 = 51 => ["IBM423", "CP423"],
    IBM424 = 52 => ["IBM424", "CP424"],
    IBM437 = 53 => ["IBM437", "CP437"],
    IBM500 = 54 => ["IBM500", "CP500"],
    IBM775 = 55 => ["IBM775", "CP775"],
    IBM850 = 56 => ["IBM850", "CP850"],
    IBM851 = 57 => ["IBM851", "CP851"],
    IBM852 = 58 => ["IBM852", "CP852"],
    IBM855 = 59 => ["IBM855", "CP855"],
    IBM857 = 60 => ["IBM857", "CP857"],
    IBM860 = 61 => ["IBM860", "CP860"],
    IBM861 = 62 => ["IBM861", "CP861"],
    IBM862 = 63 => ["IBM862", "CP862"],
    IBM863 = 64 => ["IBM863", "CP863"],
    IBM864 = 65 => ["IBM864", "CP864"],
    IBM865 = 66 => ["IBM865", "CP865"],
    IBM866 = 67 => ["IBM866", "CP866"],
    IBM868 = 68 => ["IBM868", "CP868"],
    IBM869 = 69 => ["IBM869", "CP869"],
    IBM870 = 70 => ["IBM870", "CP870"],
    IBM871 = 71 => ["IBM871", "CP871"],
    IBM880 = 72 => ["IBM880", "CP880"],
    IBM891 = 73 => ["IBM891", "CP891"],
    IBM903 = 74 => ["IBM903", "CP903"],
    IBM904 = 75 => ["IBM904", "CP904"],
    IBM905 = 76 => ["IBM905", "CP905"],
    IBM918 = 77 => ["IBM918", "CP918"],
    IBM1026 = 78 => ["IBM1026", "CP1026"],
    IBM1047 = 79 => ["IBM1047", "CP1047"],
    Windows_936 = 80 => ["windows-936", "GBK", "CP936"],
    Windows_1250 = 81 => ["windows-1250", "CP1250"],
    Windows_1251 = 82 => ["windows-1251", "CP1251"],
    Windows_1252 = 83 => ["windows-1252", "CP1252"],
    Windows_1253 = 84 => ["windows-1253", "CP1253"],
    Windows_1254 = 85 => ["windows-1254", "CP1254"],
    Windows_1255 = 86 => ["windows-1255", "CP1255"],
    Windows_1256 = 87 => ["windows-1256", "CP1256"],
    Windows_1257 = 88 => ["windows-1257", "CP1257"],
    Windows_1258 = 89 => ["windows-1258", "CP1258"],
    IBM00858 = 90 => ["IBM00858", "CP00858"],
    IBM00924 = 91 => ["IBM00924", "CP00924"],
    IBM01140 = 92 => ["IBM01140", "CP01140"],
    IBM01141 = 93 => ["IBM01141", "CP01141"],
    IBM01142 = 94 => ["IBM01142", "CP01142"],
    IBM01143 = 95 => ["IBM01143", "CP01143"],
    IBM01144 = 96 => ["IBM01144", "CP01144"],
    IBM01145 = 97 => ["IBM01145", "CP01145"],
    IBM01146 = 98 => ["IBM01146", "CP01146"],
    IBM01147 = 99 => ["IBM01147", "CP01147"],
    IBM01148 = 100 => ["IBM01148", "CP01148"],
    IBM01149 = 101 => ["IBM01149", "CP01149"],

    // KOI8
    KOI8_E = 102 => ["KOI8-E", "ECMA-cyrillic"],
    KOI8_R = 103 => ["KOI8-R", "CP878"],
    KOI8_U = 104 => ["KOI8-U"],

    // Unicode
    UCS_2 = 105 => ["ISO-10646-UCS-2", "UCS-2"],
    UCS_4 = 106 => ["ISO-10646-UCS-4", "UCS-4"],
    UTF_8 = 107 => ["UTF-8", "UTF8"],
    UTF_16 = 108 => ["UTF-16"],
    UTF_16BE = 109 => ["UTF-16BE"],
    UTF_16LE = 110 => ["UTF-16LE"],
    UTF_32 = 111 => ["UTF-32"],
    UTF_32BE = 112 => ["UTF-32BE"],
    UTF_32LE = 113 => ["UTF-32LE"],
    UTF_7 = 114 => ["UTF-7"],
    UNICODE_1_1_UTF_7 = 115 => ["UNICODE-1-1-UTF-7"],
    ISO_10646_UTF_1 = 116 => ["ISO-10646-UTF-1"],

    // ISO-2022
    ISO_2022_KR = 117 => ["ISO-2022-KR"],
    ISO_2022_JP = 118 => ["ISO-2022-JP", "ISO2022-JP"],
    ISO_2022_JP_2 = 119 => ["ISO-2022-JP-2", "ISO2022-JP2"],
    ISO_2022_CN = 120 => ["ISO-2022-CN"],
    ISO_2022_CN_EXT = 121 => ["ISO-2022-CN-EXT"],

    // Multi-byte sets without codecs in this crate
    Shift_JIS = 122 => ["Shift_JIS", "MS_Kanji", "SJIS"],
    EUC_JP = 123 => ["EUC-JP", "eucJP"],
    EUC_KR = 124 => ["EUC-KR", "eucKR"],
    GB2312 = 125 => ["GB2312", "EUC-CN"],
    GB18030 = 126 => ["GB18030"],
    Big5 = 127 => ["Big5"],
    TIS_620 = 128 => ["TIS-620"],
    VISCII = 129 => ["VISCII"],
    Macintosh = 130 => ["macintosh", "macRoman"],
    Windows_31J = 131 => ["Windows-31J", "csWindows31J"],
}

impl Charset {
    pub fn id(&self) -> u16 {
        *self as u16
    }

    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Looks a charset up by its canonical name or any alias, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Charset, CodecError> {
        Charset::ALL
            .iter()
            .copied()
            .find(|cs| cs.aliases().iter().any(|a| a.eq_ignore_ascii_case(name)))
            .ok_or_else(|| CodecError::UnknownCharset {
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ids_are_dense_and_stable() {
        for (i, cs) in Charset::ALL.iter().enumerate() {
            assert_eq!(cs.id() as usize, i);
            assert_eq!(Charset::from_id(cs.id()), Some(*cs));
        }
        assert_eq!(Charset::US_ASCII.id(), 0);
        assert_eq!(Charset::ISO_8859_1.id(), 1);
        assert_eq!(Charset::from_id(u16::MAX), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Charset::from_name("utf-8").unwrap(), Charset::UTF_8);
        assert_eq!(Charset::from_name("ANSI_X3.4-1968").unwrap(), Charset::US_ASCII);
        assert_eq!(Charset::from_name("latin9").ok(), None);
        assert!(matches!(
            Charset::from_name("no-such-charset"),
            Err(CodecError::UnknownCharset { name }) if name == "no-such-charset"
        ));
    }

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for cs in Charset::ALL {
            for alias in cs.aliases() {
                assert!(
                    seen.insert(alias.to_ascii_lowercase()),
                    "duplicate alias {alias}"
                );
            }
        }
    }
}
