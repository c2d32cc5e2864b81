use serde::Serialize;

/// Descriptive statistics of a sample.
///
/// `variance` is the sample variance (n - 1 denominator). `skewness` and
/// `kurtosis` are the biased moment estimators, kurtosis in Fisher form
/// (0 for a normal distribution). Moments that are undefined for the sample
/// are `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

pub fn describe(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let moment = |k: i32| values.iter().map(|v| (v - mean).powi(k)).sum::<f64>() / n;
    let m2 = moment(2);
    let m3 = moment(3);
    let m4 = moment(4);

    let variance = if values.len() > 1 {
        m2 * n / (n - 1.0)
    } else {
        f64::NAN
    };
    let (skewness, kurtosis) = if m2 > 0.0 {
        (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
    } else {
        (f64::NAN, f64::NAN)
    };

    Some(Summary {
        count: values.len(),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        mean,
        variance,
        skewness,
        kurtosis,
    })
}
