use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Diabetes screening inputs, in the column order the diabetes model was trained on.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiabetesInput {
    #[serde(rename = "Pregnancies")]
    #[validate(range(min = 0))]
    pub pregnancies: i32,
    #[serde(rename = "Glucose")]
    #[validate(range(min = 0.0))]
    pub glucose: f64,
    #[serde(rename = "BloodPressure")]
    #[validate(range(min = 0.0))]
    pub blood_pressure: f64,
    #[serde(rename = "SkinThickness")]
    #[validate(range(min = 0.0))]
    pub skin_thickness: f64,
    #[serde(rename = "Insulin")]
    #[validate(range(min = 0.0))]
    pub insulin: f64,
    #[serde(rename = "BMI")]
    #[validate(range(min = 0.0))]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    #[validate(range(min = 0.0))]
    pub diabetes_pedigree_function: f64,
    #[serde(rename = "Age")]
    #[validate(range(min = 0))]
    pub age: i32,
}

impl DiabetesInput {
    pub const FEATURE_COUNT: usize = 8;

    pub fn to_feature_vector(&self) -> Array1<f64> {
        Array1::from(vec![
            self.pregnancies as f64,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree_function,
            self.age as f64,
        ])
    }
}

/// Heart disease inputs. Binary clinical flags must be 0 or 1.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HeartInput {
    #[validate(range(min = 0))]
    pub age: i32,
    #[validate(range(min = 0, max = 1))]
    pub sex: i32,
    #[validate(range(min = 0))]
    pub chest_pain_type: i32,
    #[validate(range(min = 0.0))]
    pub resting_bp_s: f64,
    #[validate(range(min = 0.0))]
    pub cholesterol: f64,
    #[validate(range(min = 0, max = 1))]
    pub fasting_blood_sugar: i32,
    #[validate(range(min = 0))]
    pub resting_ecg: i32,
    #[validate(range(min = 0.0))]
    pub max_heart_rate: f64,
    #[validate(range(min = 0, max = 1))]
    pub exercise_angina: i32,
    /// ST depression; negative values occur in practice.
    pub oldpeak: f64,
    #[serde(rename = "ST_slope")]
    #[validate(range(min = 0))]
    pub st_slope: i32,
}

impl HeartInput {
    pub const FEATURE_COUNT: usize = 11;

    pub fn to_feature_vector(&self) -> Array1<f64> {
        Array1::from(vec![
            self.age as f64,
            self.sex as f64,
            self.chest_pain_type as f64,
            self.resting_bp_s,
            self.cholesterol,
            self.fasting_blood_sugar as f64,
            self.resting_ecg as f64,
            self.max_heart_rate,
            self.exercise_angina as f64,
            self.oldpeak,
            self.st_slope as f64,
        ])
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown cancer feature: {0}")]
pub struct UnknownCancerFeature(pub String);

/// Named tumor measurements accepted by the cancer model. The model's column
/// order comes from an external list, so features are addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancerFeature {
    RadiusMean,
    TextureMean,
    PerimeterMean,
    AreaMean,
    SmoothnessMean,
    CompactnessMean,
    ConcavityMean,
    ConcavePointsMean,
    SymmetryMean,
    FractalDimensionMean,
    RadiusSe,
    TextureSe,
    PerimeterSe,
    AreaSe,
    SmoothnessSe,
    CompactnessSe,
    ConcavitySe,
    ConcavePointsSe,
    SymmetrySe,
    FractalDimensionSe,
    RadiusWorst,
    TextureWorst,
    PerimeterWorst,
    AreaWorst,
    SmoothnessWorst,
    CompactnessWorst,
    ConcavityWorst,
    ConcavePointsWorst,
    SymmetryWorst,
    FractalDimensionWorst,
}

impl CancerFeature {
    pub const ALL: [CancerFeature; 30] = [
        CancerFeature::RadiusMean,
        CancerFeature::TextureMean,
        CancerFeature::PerimeterMean,
        CancerFeature::AreaMean,
        CancerFeature::SmoothnessMean,
        CancerFeature::CompactnessMean,
        CancerFeature::ConcavityMean,
        CancerFeature::ConcavePointsMean,
        CancerFeature::SymmetryMean,
        CancerFeature::FractalDimensionMean,
        CancerFeature::RadiusSe,
        CancerFeature::TextureSe,
        CancerFeature::PerimeterSe,
        CancerFeature::AreaSe,
        CancerFeature::SmoothnessSe,
        CancerFeature::CompactnessSe,
        CancerFeature::ConcavitySe,
        CancerFeature::ConcavePointsSe,
        CancerFeature::SymmetrySe,
        CancerFeature::FractalDimensionSe,
        CancerFeature::RadiusWorst,
        CancerFeature::TextureWorst,
        CancerFeature::PerimeterWorst,
        CancerFeature::AreaWorst,
        CancerFeature::SmoothnessWorst,
        CancerFeature::CompactnessWorst,
        CancerFeature::ConcavityWorst,
        CancerFeature::ConcavePointsWorst,
        CancerFeature::SymmetryWorst,
        CancerFeature::FractalDimensionWorst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CancerFeature::RadiusMean => "radius_mean",
            CancerFeature::TextureMean => "texture_mean",
            CancerFeature::PerimeterMean => "perimeter_mean",
            CancerFeature::AreaMean => "area_mean",
            CancerFeature::SmoothnessMean => "smoothness_mean",
            CancerFeature::CompactnessMean => "compactness_mean",
            CancerFeature::ConcavityMean => "concavity_mean",
            CancerFeature::ConcavePointsMean => "concave_points_mean",
            CancerFeature::SymmetryMean => "symmetry_mean",
            CancerFeature::FractalDimensionMean => "fractal_dimension_mean",
            CancerFeature::RadiusSe => "radius_se",
            CancerFeature::TextureSe => "texture_se",
            CancerFeature::PerimeterSe => "perimeter_se",
            CancerFeature::AreaSe => "area_se",
            CancerFeature::SmoothnessSe => "smoothness_se",
            CancerFeature::CompactnessSe => "compactness_se",
            CancerFeature::ConcavitySe => "concavity_se",
            CancerFeature::ConcavePointsSe => "concave_points_se",
            CancerFeature::SymmetrySe => "symmetry_se",
            CancerFeature::FractalDimensionSe => "fractal_dimension_se",
            CancerFeature::RadiusWorst => "radius_worst",
            CancerFeature::TextureWorst => "texture_worst",
            CancerFeature::PerimeterWorst => "perimeter_worst",
            CancerFeature::AreaWorst => "area_worst",
            CancerFeature::SmoothnessWorst => "smoothness_worst",
            CancerFeature::CompactnessWorst => "compactness_worst",
            CancerFeature::ConcavityWorst => "concavity_worst",
            CancerFeature::ConcavePointsWorst => "concave_points_worst",
            CancerFeature::SymmetryWorst => "symmetry_worst",
            CancerFeature::FractalDimensionWorst => "fractal_dimension_worst",
        }
    }
}

impl FromStr for CancerFeature {
    type Err = UnknownCancerFeature;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|feature| feature.as_str() == name)
            .ok_or_else(|| UnknownCancerFeature(name.to_string()))
    }
}

impl fmt::Display for CancerFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breast tumor measurements: mean, standard error and worst value of ten
/// cell-nucleus characteristics.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CancerInput {
    #[validate(range(min = 0.0))]
    pub radius_mean: f64,
    #[validate(range(min = 0.0))]
    pub texture_mean: f64,
    #[validate(range(min = 0.0))]
    pub perimeter_mean: f64,
    #[validate(range(min = 0.0))]
    pub area_mean: f64,
    #[validate(range(min = 0.0))]
    pub smoothness_mean: f64,
    #[validate(range(min = 0.0))]
    pub compactness_mean: f64,
    #[validate(range(min = 0.0))]
    pub concavity_mean: f64,
    #[validate(range(min = 0.0))]
    pub concave_points_mean: f64,
    #[validate(range(min = 0.0))]
    pub symmetry_mean: f64,
    #[validate(range(min = 0.0))]
    pub fractal_dimension_mean: f64,
    #[validate(range(min = 0.0))]
    pub radius_se: f64,
    #[validate(range(min = 0.0))]
    pub texture_se: f64,
    #[validate(range(min = 0.0))]
    pub perimeter_se: f64,
    #[validate(range(min = 0.0))]
    pub area_se: f64,
    #[validate(range(min = 0.0))]
    pub smoothness_se: f64,
    #[validate(range(min = 0.0))]
    pub compactness_se: f64,
    #[validate(range(min = 0.0))]
    pub concavity_se: f64,
    #[validate(range(min = 0.0))]
    pub concave_points_se: f64,
    #[validate(range(min = 0.0))]
    pub symmetry_se: f64,
    #[validate(range(min = 0.0))]
    pub fractal_dimension_se: f64,
    #[validate(range(min = 0.0))]
    pub radius_worst: f64,
    #[validate(range(min = 0.0))]
    pub texture_worst: f64,
    #[validate(range(min = 0.0))]
    pub perimeter_worst: f64,
    #[validate(range(min = 0.0))]
    pub area_worst: f64,
    #[validate(range(min = 0.0))]
    pub smoothness_worst: f64,
    #[validate(range(min = 0.0))]
    pub compactness_worst: f64,
    #[validate(range(min = 0.0))]
    pub concavity_worst: f64,
    #[validate(range(min = 0.0))]
    pub concave_points_worst: f64,
    #[validate(range(min = 0.0))]
    pub symmetry_worst: f64,
    #[validate(range(min = 0.0))]
    pub fractal_dimension_worst: f64,
}

impl CancerInput {
    pub fn value(&self, feature: CancerFeature) -> f64 {
        match feature {
            CancerFeature::RadiusMean => self.radius_mean,
            CancerFeature::TextureMean => self.texture_mean,
            CancerFeature::PerimeterMean => self.perimeter_mean,
            CancerFeature::AreaMean => self.area_mean,
            CancerFeature::SmoothnessMean => self.smoothness_mean,
            CancerFeature::CompactnessMean => self.compactness_mean,
            CancerFeature::ConcavityMean => self.concavity_mean,
            CancerFeature::ConcavePointsMean => self.concave_points_mean,
            CancerFeature::SymmetryMean => self.symmetry_mean,
            CancerFeature::FractalDimensionMean => self.fractal_dimension_mean,
            CancerFeature::RadiusSe => self.radius_se,
            CancerFeature::TextureSe => self.texture_se,
            CancerFeature::PerimeterSe => self.perimeter_se,
            CancerFeature::AreaSe => self.area_se,
            CancerFeature::SmoothnessSe => self.smoothness_se,
            CancerFeature::CompactnessSe => self.compactness_se,
            CancerFeature::ConcavitySe => self.concavity_se,
            CancerFeature::ConcavePointsSe => self.concave_points_se,
            CancerFeature::SymmetrySe => self.symmetry_se,
            CancerFeature::FractalDimensionSe => self.fractal_dimension_se,
            CancerFeature::RadiusWorst => self.radius_worst,
            CancerFeature::TextureWorst => self.texture_worst,
            CancerFeature::PerimeterWorst => self.perimeter_worst,
            CancerFeature::AreaWorst => self.area_worst,
            CancerFeature::SmoothnessWorst => self.smoothness_worst,
            CancerFeature::CompactnessWorst => self.compactness_worst,
            CancerFeature::ConcavityWorst => self.concavity_worst,
            CancerFeature::ConcavePointsWorst => self.concave_points_worst,
            CancerFeature::SymmetryWorst => self.symmetry_worst,
            CancerFeature::FractalDimensionWorst => self.fractal_dimension_worst,
        }
    }

    /// Reads the fields in exactly the order given by `order`.
    pub fn to_feature_vector(&self, order: &[CancerFeature]) -> Array1<f64> {
        order.iter().map(|feature| self.value(*feature)).collect()
    }
}
