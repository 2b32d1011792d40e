// File: crates/dash-core/tests/common/mod.rs
// Purpose: Small in-memory datasets shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use dash_core::data::{
    DeathRecord, DrugRow, DrugSeries, IncomeRecord, StateShape, StateYears, UnemploymentRecord,
};
use dash_core::{Datasets, Hierarchy, TreeRecord};

fn death(year: i32, death_rate: f64) -> DeathRecord {
    DeathRecord { year, death_rate, deaths: death_rate * 100.0, population: 10_000_000.0 }
}

fn square(id: &str, x: f64, y: f64) -> StateShape {
    StateShape { id: id.into(), outline: vec![[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0]] }
}

/// Two-category hierarchy covering 2003..=2013 (11 sizes per leaf).
pub fn sample_tree() -> Hierarchy {
    let series = |base: f64| (0..11).map(|i| base + i as f64 * 10.0).collect::<Vec<_>>();
    let record = TreeRecord::group(
        "drugs",
        vec![
            TreeRecord::group(
                "Opioids",
                vec![TreeRecord::leaf("Heroin", series(400.0)), TreeRecord::leaf("Other_Opiates", series(200.0))],
            ),
            TreeRecord::group(
                "Stimulants",
                vec![TreeRecord::leaf("Cocaine", series(300.0)), TreeRecord::leaf("Methamphetamine", series(100.0))],
            ),
        ],
    )
    .with_years(2003, 2013);
    Hierarchy::from_record(record).expect("sample tree is well formed")
}

pub fn sample_series() -> DrugSeries {
    let rows = (2003..=2013)
        .map(|y| DrugRow {
            date: NaiveDate::from_ymd_opt(y, 1, 1).expect("valid date"),
            values: vec![1000.0 + y as f64, 500.0, 250.0],
        })
        .collect();
    DrugSeries { substances: vec!["Heroin".into(), "Cocaine".into(), "Methamphetamine".into()], rows }
}

/// Ohio and Texas over 2013/2014, plus the national aggregate row.
pub fn sample_datasets() -> Datasets {
    let deaths = vec![
        StateYears::new("Ohio", vec![death(2013, 20.0), death(2014, 24.6)]),
        StateYears::new("Texas", vec![death(2013, 10.0), death(2014, 9.7)]),
        StateYears::new("United States", vec![death(2013, 13.8), death(2014, 14.7)]),
    ];
    let income = vec![
        StateYears::new(
            "Ohio",
            vec![IncomeRecord { year: 2013, median_income: 46_000.0 }, IncomeRecord { year: 2014, median_income: 49_000.0 }],
        ),
        StateYears::new(
            "Texas",
            vec![IncomeRecord { year: 2013, median_income: 51_000.0 }, IncomeRecord { year: 2014, median_income: 53_000.0 }],
        ),
        StateYears::new(
            "United States",
            vec![IncomeRecord { year: 2013, median_income: 52_000.0 }, IncomeRecord { year: 2014, median_income: 53_600.0 }],
        ),
    ];
    let unemployment = vec![
        StateYears::new(
            "Ohio",
            vec![
                UnemploymentRecord { year: 2013, unemployment: 7.4 },
                UnemploymentRecord { year: 2014, unemployment: 5.7 },
            ],
        ),
        StateYears::new(
            "Texas",
            vec![
                UnemploymentRecord { year: 2013, unemployment: 6.3 },
                UnemploymentRecord { year: 2014, unemployment: 5.1 },
            ],
        ),
        StateYears::new(
            "United States",
            vec![
                UnemploymentRecord { year: 2013, unemployment: 7.4 },
                UnemploymentRecord { year: 2014, unemployment: 6.2 },
            ],
        ),
    ];
    let shapes = vec![square("Texas", -100.0, 30.0), square("Ohio", -83.0, 40.0)];
    Datasets::new(shapes, deaths, income, unemployment, sample_tree(), sample_series())
        .expect("sample datasets are aligned")
}
