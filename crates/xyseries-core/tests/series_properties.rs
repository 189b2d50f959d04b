use tempfile::tempdir;
use xyseries::engine::progress::ProgressReporter;
use xyseries::engine::{binning::BinningMode, config::HistogramConfigBuilder};
use xyseries::workflows::histogram;
use xyseries::{Point2D, SeriesBuffer, SeriesError};

fn buffers() -> Vec<SeriesBuffer<f64>> {
    let wavy: Vec<f64> = (0..257).map(|i| (i as f64 * 0.37).sin() * 1.0e3).collect();
    vec![
        SeriesBuffer::from_y(vec![42.0]),
        SeriesBuffer::from_y(wavy.clone()),
        SeriesBuffer::from_xy(wavy.iter().map(|v| v / 7.0).collect::<Vec<_>>(), wavy),
        SeriesBuffer::from_xy(vec![-1.5e-9, 3.25, 1.0e12], vec![0.0, -0.0, 7.0]),
    ]
}

#[test]
fn file_round_trip_restores_every_buffer() {
    let dir = tempdir().unwrap();
    for (i, original) in buffers().into_iter().enumerate() {
        let path = dir.path().join(format!("buffer-{}.dat", i));
        original.write_to_file(&path, false, 0).unwrap();

        let mut restored = SeriesBuffer::new();
        let read = restored.read_from_file(&path, false, 0).unwrap();
        assert_eq!(read, original.len());
        for (a, b) in original.iter().zip(restored.iter()) {
            assert!(a.approx_eq(&b, original.tolerance()), "{:?} != {:?}", a, b);
        }
    }
}

#[test]
fn append_grows_by_exactly_k_and_keeps_prefix() {
    for original in buffers() {
        let mut buffer = original.clone();
        buffer.append(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert_eq!(buffer.len(), original.len() + 3);
        assert_eq!(&buffer.x_values()[..original.len()], original.x_values());
        assert_eq!(&buffer.y_values()[..original.len()], original.y_values());

        let mut buffer = original.clone();
        buffer.append_y(&[9.0, 9.0]).unwrap();
        assert_eq!(buffer.len(), original.len() + 2);
        assert_eq!(&buffer.y_values()[..original.len()], original.y_values());
    }
}

#[test]
fn resize_keeps_prefix_and_zero_fills() {
    for original in buffers() {
        let n = original.len();
        for new_len in [1, n.div_ceil(2).max(1), n, n + 5] {
            let mut buffer = original.clone();
            buffer.resize(new_len);
            assert_eq!(buffer.len(), new_len);
            let kept = n.min(new_len);
            assert_eq!(&buffer.x_values()[..kept], &original.x_values()[..kept]);
            assert_eq!(&buffer.y_values()[..kept], &original.y_values()[..kept]);
            assert!(buffer.x_values()[kept..].iter().all(|&v| v == 0.0));
            assert!(buffer.y_values()[kept..].iter().all(|&v| v == 0.0));
        }
    }
}

#[test]
fn y_histogram_conserves_counts() {
    for buffer in buffers() {
        let histogram = buffer.make_y_histogram().unwrap();
        assert_eq!(histogram.sum_y().unwrap(), buffer.len() as f64);
        assert!(histogram.len() <= buffer.len());
    }
}

#[test]
fn y_only_construction_fills_x_with_indices() {
    let buffer = SeriesBuffer::from_y(vec![7.5f32; 64]);
    for (i, &x) in buffer.x_values().iter().enumerate() {
        assert_eq!(x, i as f32);
    }
}

#[test]
fn statistics_of_one_to_five() {
    let buffer = SeriesBuffer::<f64>::from_y(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(buffer.average_y().unwrap(), 3.0);
    assert_eq!(buffer.sum_y().unwrap(), 15.0);
    assert!((buffer.stddev_y().unwrap() - 1.5811).abs() < 1e-4);
}

#[test]
fn extrema_bound_every_entry() {
    for buffer in buffers() {
        let (min_x, max_x) = (buffer.min_x().unwrap(), buffer.max_x().unwrap());
        let (min_y, max_y) = (buffer.min_y().unwrap(), buffer.max_y().unwrap());
        for Point2D { x, y } in buffer.iter() {
            assert!(min_x <= x && x <= max_x);
            assert!(min_y <= y && y <= max_y);
        }
        let i = buffer.index_of_max_y().unwrap();
        assert_eq!(buffer.y_at(i).unwrap(), max_y);
    }
}

#[test]
fn histogram_workflow_bins_six_samples() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("samples.dat");
    std::fs::write(&input, "1\n2\n2\n3\n3\n3\n").unwrap();
    let config = HistogramConfigBuilder::new()
        .input_path(input)
        .output_path(dir.path().join("out.dat"))
        .bins(3)
        .mode(BinningMode::Offset)
        .build()
        .unwrap();

    histogram::run(&config, &ProgressReporter::new()).unwrap();

    let mut result = SeriesBuffer::<f64>::new();
    assert_eq!(result.read_from_file(&config.output_path, false, 0).unwrap(), 3);
    assert_eq!(result.sum_y().unwrap(), 6.0);
}

#[test]
fn empty_buffer_guards() {
    let empty = SeriesBuffer::<f64>::new();
    let failures: Vec<Result<f64, SeriesError>> = vec![
        empty.min_x(),
        empty.max_x(),
        empty.min_y(),
        empty.max_y(),
        empty.sum_x(),
        empty.sum_y(),
        empty.average_x(),
        empty.average_y(),
        empty.stddev_x(),
        empty.stddev_y(),
        empty.stddev_mean_x(),
        empty.stddev_mean_y(),
        empty.y_at_x(0.0),
        empty.x_at_y(0.0),
        empty.max_y_in_x_range(0.0, 1.0),
        empty.min_y_in_x_range(0.0, 1.0),
        empty.max_x_in_y_range(0.0, 1.0),
        empty.min_x_in_y_range(0.0, 1.0),
    ];
    assert!(failures.iter().all(Result::is_err));

    let index_failures = [
        empty.index_of_min_x(),
        empty.index_of_max_x(),
        empty.index_of_min_y(),
        empty.index_of_max_y(),
        empty.find_index(0.0, 0.0),
        empty.find_index_x(0.0),
        empty.find_index_y(0.0),
    ];
    assert!(index_failures.iter().all(Result::is_err));
    assert!(empty.at(0).is_err());
    assert!(empty.make_y_histogram().is_err());
}
