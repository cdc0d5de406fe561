//! End-to-end decoding of crafted heap dumps through the public API.

use std::time::Duration;

use dumpscope::{
    write_prefixed_bytes, write_uvarint, DecoderConfig, DumpReader, DumpWriter, Error, Field,
    FieldKind, Goroutine, GoroutineStatus, HeapDump, HeapObject, Record, Root, StackFrame,
    StreamSource, Tag, TypeDescriptor, MAGIC,
};

/// A small but complete dump: one of every supported record kind.
fn sample_records() -> Vec<Record> {
    vec![
        Record::Type(TypeDescriptor {
            address: 0x4b_2e40,
            size: 32,
            name: "main.session".into(),
            is_pointer: false,
        }),
        Record::Object(HeapObject {
            address: 0xc000_0140_00,
            contents: (0u8..32).collect(),
            fields: vec![
                Field::new(FieldKind::Pointer, 0),
                Field::new(FieldKind::EmptyInterface, 16),
            ],
        }),
        Record::Goroutine(Goroutine {
            address: 0xc000_0001_a0,
            current_frame: 0xc000_0477_50,
            id: 1,
            go_statement: 0,
            status: GoroutineStatus::Waiting,
            is_system: false,
            is_background: false,
            started: Duration::new(1_700_000_000, 42),
            wait_reason: "semacquire".into(),
            context: 0,
            thread: 0xc000_0380_00,
            defer_chain: 0,
            panic_chain: 0,
        }),
        Record::StackFrame(StackFrame {
            address: 0xc000_0477_50,
            depth: 0,
            child: 0,
            contents: vec![0x11; 24],
            entry_pc: 0x46_0a20,
            current_pc: 0x46_0a7f,
            continuation_pc: 0x46_0a80,
            function_name: "sync.runtime_Semacquire".into(),
            fields: vec![Field::new(FieldKind::Pointer, 8)],
        }),
        Record::Root(Root {
            description: "runtime.m0".into(),
            target: 0x1000,
        }),
    ]
}

/// Encodes `records` and returns the dump plus the offset at which each record ends.
fn encode(records: &[Record], with_eof: bool) -> (Vec<u8>, Vec<usize>) {
    let mut writer = DumpWriter::new(Vec::new()).unwrap();
    let mut boundaries = vec![MAGIC.len()];
    for record in records {
        writer.write_record(record).unwrap();
        boundaries.push(writer.get_ref().len());
    }

    let data = if with_eof {
        writer.finish().unwrap()
    } else {
        writer.get_ref().clone()
    };
    (data, boundaries)
}

#[test]
fn other_root_scenario() {
    let mut data = MAGIC.to_vec();
    write_uvarint(&mut data, 2).unwrap();
    write_prefixed_bytes(&mut data, b"runtime.m0").unwrap();
    write_uvarint(&mut data, 0x1000).unwrap();
    write_uvarint(&mut data, 0).unwrap();

    let mut reader = DumpReader::from_slice(&data);
    match reader.next() {
        Some(Ok(Record::Root(root))) => {
            assert_eq!(root.description, "runtime.m0");
            assert_eq!(root.target, 0x1000);
        }
        other => panic!("Expected a root, got {:?}", other),
    }
    assert!(reader.next().is_none());
}

#[test]
fn object_scenario() {
    let mut data = MAGIC.to_vec();
    data.extend_from_slice(&[0x01]);
    write_uvarint(&mut data, 0x2000).unwrap();
    data.extend_from_slice(&[0x03, 0x01, 0x02, 0x03]);
    data.extend_from_slice(&[0x01, 0x00, 0x00]);
    data.push(0x00);

    let records = HeapDump::from_mem(data).unwrap().read_all().unwrap();
    assert_eq!(
        records,
        vec![Record::Object(HeapObject {
            address: 0x2000,
            contents: vec![1, 2, 3],
            fields: vec![Field::new(FieldKind::Pointer, 0)],
        })]
    );
}

#[test]
fn every_record_kind() {
    let records = sample_records();
    let (data, _) = encode(&records, true);

    let dump = HeapDump::from_mem(data).unwrap();
    let decoded = dump.read_all().unwrap();
    assert_eq!(decoded, records);

    let tags: Vec<Tag> = decoded.iter().map(Record::tag).collect();
    assert_eq!(
        tags,
        vec![
            Tag::Type,
            Tag::Object,
            Tag::Goroutine,
            Tag::StackFrame,
            Tag::OtherRoot
        ]
    );
}

#[test]
fn truncation_inside_a_record_is_detected() {
    let records = sample_records();
    let (data, boundaries) = encode(&records, false);

    for cut in 0..data.len() {
        let result: Result<Vec<Record>, Error> =
            DumpReader::from_slice(&data[..cut]).collect();

        match boundaries.iter().position(|&boundary| boundary == cut) {
            // Cut between two records: indistinguishable from a shorter dump
            Some(complete) => assert_eq!(result.unwrap(), records[..complete].to_vec()),
            None => assert!(
                matches!(result, Err(Error::Truncated { .. })),
                "cut at {} was not reported as truncated",
                cut
            ),
        }
    }
}

#[test]
fn bad_magic_is_rejected() {
    let (mut data, _) = encode(&sample_records(), true);
    data[3] = b'5';

    assert!(matches!(HeapDump::from_mem(data.clone()), Err(Error::BadMagic)));

    let mut reader = DumpReader::from_slice(&data);
    assert!(matches!(reader.next(), Some(Err(Error::BadMagic))));
    assert!(reader.next().is_none());
}

#[test]
fn unknown_tag_stops_decoding() {
    let (mut data, _) = encode(&sample_records()[..1], false);
    // A finalizer record followed by bytes that would parse as a root
    write_uvarint(&mut data, Tag::Finalizer.value()).unwrap();
    write_uvarint(&mut data, Tag::OtherRoot.value()).unwrap();
    write_prefixed_bytes(&mut data, b"x").unwrap();
    write_uvarint(&mut data, 1).unwrap();

    let mut reader = DumpReader::from_slice(&data);
    assert!(matches!(reader.next(), Some(Ok(Record::Type(_)))));
    assert!(matches!(reader.next(), Some(Err(Error::UnknownTag(7)))));
    assert!(reader.next().is_none());
}

#[test]
fn stream_and_slice_agree() {
    let records = sample_records();
    let (data, _) = encode(&records, true);

    let from_slice: Vec<Record> = DumpReader::from_slice(&data)
        .collect::<Result<_, _>>()
        .unwrap();
    let from_stream: Vec<Record> = DumpReader::new(StreamSource::new(data.as_slice()))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(from_slice, records);
    assert_eq!(from_stream, records);
}

#[test]
fn hardened_config_rejects_forged_length() {
    let mut data = MAGIC.to_vec();
    write_uvarint(&mut data, Tag::Object.value()).unwrap();
    write_uvarint(&mut data, 0x2000).unwrap();
    write_uvarint(&mut data, 1 << 40).unwrap();

    let reader = DumpReader::with_config(
        StreamSource::new(data.as_slice()),
        DecoderConfig::hardened(),
    );
    let result: Result<Vec<Record>, Error> = reader.collect();
    assert!(matches!(result, Err(Error::LimitExceeded { .. })));

    // Without limits the same input simply runs out of data
    let result: Result<Vec<Record>, Error> = DumpReader::from_reader(data.as_slice()).collect();
    assert!(matches!(result, Err(Error::Truncated { .. })));
}

#[test]
fn heap_dump_from_file() {
    let (data, _) = encode(&sample_records(), true);
    let path = std::env::temp_dir().join("dumpscope_integration_from_file.bin");
    std::fs::write(&path, &data).unwrap();

    let dump = HeapDump::from_file(&path).unwrap();
    assert_eq!(dump.len(), data.len());
    assert_eq!(dump.read_all().unwrap(), sample_records());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file() {
    let result = HeapDump::from_file(std::path::Path::new("/nonexistent/heapdump"));
    assert!(matches!(result, Err(Error::FileError(_))));
}

#[test]
fn non_utf8_text_survives_decode_and_encode() {
    let mut data = MAGIC.to_vec();
    write_uvarint(&mut data, Tag::OtherRoot.value()).unwrap();
    write_prefixed_bytes(&mut data, &[b'a', 0xFF, b'b']).unwrap();
    write_uvarint(&mut data, 7).unwrap();
    write_uvarint(&mut data, Tag::Type.value()).unwrap();
    write_uvarint(&mut data, 0x50_0000).unwrap();
    write_uvarint(&mut data, 8).unwrap();
    write_prefixed_bytes(&mut data, b"main.\xC3(").unwrap();
    write_uvarint(&mut data, 1).unwrap();
    write_uvarint(&mut data, Tag::Eof.value()).unwrap();

    let records = DumpReader::from_slice(&data)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    match &records[0] {
        Record::Root(root) => {
            assert_eq!(root.description.as_bytes(), &[b'a', 0xFF, b'b']);
            assert_eq!(root.description.to_string_lossy(), "a\u{FFFD}b");
        }
        other => panic!("Expected a root, got {:?}", other),
    }

    let mut writer = DumpWriter::new(Vec::new()).unwrap();
    for record in &records {
        writer.write_record(record).unwrap();
    }
    assert_eq!(writer.finish().unwrap(), data);
}
