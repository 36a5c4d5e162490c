use crate::{
    AltitudeFix, ChecksumMode, Decodable, DilutionOfPrecision, Error, Invalidity, NmeaSentence,
    PositionFix, SatelliteVisibility, SentenceKind, checksum, decode, parse_date,
};

const VALID: [&str; 7] = [
    "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A*74",
    "$GPGGA,070812.000,3923.1196,N,11937.6931,W,1,10,0.81,1773.2,M,-21.2,M,,*62",
    "$GPGSA,A,3,28,09,08,13,19,30,07,27,11,05,,,1.13,0.81,0.79*03",
    "$GPGSV,4,1,13,07,66,049,21,30,62,322,20,28,48,239,23,09,41,161,22*74",
    "$GPGSV,4,2,13,19,38,292,25,05,26,052,17,13,25,078,20,11,18,306,16*73",
    "$GPGSV,4,3,13,08,16,116,22,01,12,296,,27,05,114,,17,03,207,*7E",
    "$GPGSV,4,4,13,48,35,195,30*4F",
];

#[test]
fn test_valid_sentences_have_no_checksum_flag() {
    for sentence in VALID {
        let decoded = NmeaSentence::decode(sentence, ChecksumMode::Required)
            .expect("supported sentence")
            .expect("decodes");

        assert!(
            !decoded.invalidity().contains(Invalidity::CHECKSUM),
            "{sentence}"
        );

        let transmitted = match decoded {
            NmeaSentence::RMC(rmc) => rmc.record.checksum,
            NmeaSentence::GGA(gga) => gga.record.checksum,
            NmeaSentence::GSA(gsa) => gsa.record.checksum,
            NmeaSentence::GSV(gsv) => gsv.record.checksum,
        };
        assert_eq!(checksum(sentence), transmitted, "{sentence}");
    }
}

#[test]
fn test_corrupted_payload_sets_checksum_flag() {
    let sentence = "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A*74";

    // 3923 -> 3933 keeps the field well-formed
    let corrupted = sentence.replace("3923.1196", "3933.1196");
    let rmc = PositionFix::decode(&corrupted).unwrap();

    assert_eq!(rmc.invalidity, Invalidity::CHECKSUM);
    assert!(rmc.record.position.latitude > 39.5);
}

#[test]
fn test_active_fix_is_fully_valid() {
    let rmc = PositionFix::decode(VALID[0]).unwrap();

    assert_eq!(rmc.invalidity.bits(), 0);
    assert_eq!(rmc.record.status, 'A');
    assert_eq!(rmc.record.mode, 'A');
}

#[test]
fn test_flags_combine() {
    // void status, epoch date and a bad checksum on the same sentence
    let sentence = "$GPRMC,070812.000,V,3923.1196,N,11937.6931,W,0.09,283.05,010180,,,N*00";
    let rmc = PositionFix::decode(sentence).unwrap();

    assert_eq!(
        rmc.invalidity,
        Invalidity::STATUS | Invalidity::DATE | Invalidity::CHECKSUM
    );
    assert_eq!(rmc.invalidity.bits(), 0xC008);
    assert_eq!(rmc.invalidity.to_string(), "date|status|checksum");
}

#[test]
fn test_epoch_date() {
    let (_, invalidity) = parse_date("800101");
    assert!(invalidity.contains(Invalidity::DATE));

    let (date, invalidity) = parse_date("231115");
    assert_eq!(date.year, 2015);
    assert!(!invalidity.contains(Invalidity::DATE));
}

#[test]
fn test_date_must_be_six_digits() {
    for token in ["2311150", "23111", "2311a5", ""] {
        let (date, invalidity) = parse_date(token);
        assert_eq!(invalidity, Invalidity::DATE, "{token:?}");
        assert_eq!(date.year, 0, "{token:?}");
    }
}

#[test]
fn test_prefix_mismatch_is_fatal() {
    for (sentence, kind) in [(VALID[1], SentenceKind::Gga), (VALID[2], SentenceKind::Gsa)] {
        assert_eq!(PositionFix::decode(sentence), Err(Error::InvalidType));
        assert_eq!(
            NmeaSentence::decode_as(SentenceKind::Rmc, sentence, ChecksumMode::Required),
            Err(Error::InvalidType)
        );
        assert!(NmeaSentence::decode_as(kind, sentence, ChecksumMode::Required).is_ok());
    }

    assert_eq!(
        AltitudeFix::decode("$GPGSV,4,4,13,48,35,195,30*4F"),
        Err(Error::InvalidType)
    );
    assert_eq!(
        DilutionOfPrecision::decode("GPGSA,A,3*1E"),
        Err(Error::InvalidType)
    );
}

#[test]
fn test_truncated_sentences_are_fatal() {
    for sentence in VALID {
        let cut = sentence
            .match_indices(',')
            .nth(2)
            .map_or(sentence.len(), |(index, _)| index);
        let head = &sentence[..cut];
        let kind = SentenceKind::identify(sentence).expect("supported sentence");

        assert_eq!(
            NmeaSentence::decode_as(kind, head, ChecksumMode::Optional),
            Err(Error::MalformedSentence),
            "{head}"
        );
    }
}

#[test]
fn test_extra_trailing_fields_tolerated() {
    // newer receivers append a navigation status after the mode
    let sentence = "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A,V*0E";
    let rmc = decode::<PositionFix>(sentence, ChecksumMode::Required).unwrap();

    assert!(rmc.is_valid(), "{}", rmc.invalidity);
    assert_eq!(rmc.record.checksum, 0x0E);
}

#[test]
fn test_gsv_slots_follow_absolute_index() {
    let gsv = SatelliteVisibility::decode(VALID[4]).unwrap();

    for (slot, satellite) in gsv.record.satellites.iter().enumerate() {
        assert_eq!(usize::from(satellite.index), 4 + slot);
        assert_eq!(usize::from(satellite.index) % 4, slot);
    }
}
