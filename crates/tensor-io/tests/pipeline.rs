// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: input list on disk → batches → result files.

use container::LayerSpec;
use dl_system::TensorShape;
use std::path::Path;
use tensor_io::{assemble_batch, quantize_inputs, InputList, OutputWriter};

fn write_f32(path: &Path, values: &[f32]) {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    std::fs::write(path, bytes).unwrap();
}

fn read_f32(path: &Path) -> Vec<f32> {
    std::fs::read(path)
        .unwrap()
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[test]
fn three_elements_in_batches_of_two() {
    let dir = tempfile::tempdir().unwrap();
    let mut lines = vec!["#input:0".to_string(), "% three images".to_string()];
    for (i, v) in [1.0f32, 2.0, 3.0].iter().enumerate() {
        let p = dir.path().join(format!("img{i}.raw"));
        write_f32(&p, &[*v, -*v]);
        lines.push(p.display().to_string());
    }
    let list_path = dir.path().join("raw_list.txt");
    std::fs::write(&list_path, lines.join("\n")).unwrap();

    let list = InputList::load(&list_path).unwrap();
    assert_eq!(list.output_layers(), &["input:0"]);

    let specs = [LayerSpec {
        name: "input:0".into(),
        dims: TensorShape::new(vec![2, 2]),
        encoding: None,
    }];
    let out = dir.path().join("output");
    let writer = OutputWriter::new(&out);

    let mut first = 0;
    for batch in list.batches(2).unwrap() {
        let tensors = assemble_batch(&specs, batch).unwrap();
        writer.write_batch(first, batch.len(), &tensors).unwrap();
        first += batch.len();
    }

    assert_eq!(read_f32(&out.join("Result_0/input_0.raw")), vec![1.0, -1.0]);
    assert_eq!(read_f32(&out.join("Result_2/input_0.raw")), vec![3.0, -3.0]);
    assert!(!out.join("Result_3").exists());
}

#[test]
fn quantized_buffers_stay_close_to_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("img.raw");
    let values = [0.25f32, 0.5, 0.75, 1.0];
    write_f32(&p, &values);
    let list = InputList::parse(&p.display().to_string()).unwrap();

    let specs = [LayerSpec {
        name: "data".into(),
        dims: TensorShape::new(vec![1, 4]),
        encoding: None,
    }];
    let mut tensors = assemble_batch(&specs, list.entries()).unwrap();
    quantize_inputs(&mut tensors, &specs, 16, false).unwrap();

    for (orig, q) in values.iter().zip(tensors["data"].as_slice()) {
        assert!((orig - q).abs() < 1e-4);
    }
}
