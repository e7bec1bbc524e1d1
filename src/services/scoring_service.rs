pub const HIGH_RISK: &str = "High Risk";
pub const LOW_RISK: &str = "Low Risk";

/// The seven scored inputs. Heart rate and ECG are collected for
/// display but never scored.
#[derive(Debug, Clone, Copy)]
pub struct RiskInputs<'a> {
    pub bp: u32,
    pub cholesterol: u32,
    pub blood_sugar: u32,
    pub bmi: f64,
    pub smoking: &'a str,
    pub alcohol: &'a str,
    pub physical_activity: &'a str,
}

/// One point per threshold condition met, max 7.
pub fn risk_points(inputs: &RiskInputs) -> u8 {
    let mut points = 0;
    if inputs.bp > 140 {
        points += 1;
    }
    if inputs.cholesterol > 240 {
        points += 1;
    }
    if inputs.blood_sugar > 120 {
        points += 1;
    }
    if inputs.bmi > 30.0 {
        points += 1;
    }
    if inputs.smoking == "Regularly" {
        points += 1;
    }
    if inputs.alcohol == "Frequently" {
        points += 1;
    }
    if inputs.physical_activity == "Low" {
        points += 1;
    }
    points
}

pub fn classify(points: u8) -> &'static str {
    if points >= 3 {
        HIGH_RISK
    } else {
        LOW_RISK
    }
}

/// Deterministic threshold classifier: label plus raw point count.
/// No other state influences the label.
pub fn score(inputs: &RiskInputs) -> (u8, &'static str) {
    let points = risk_points(inputs);
    (points, classify(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> RiskInputs<'static> {
        RiskInputs {
            bp: 100,
            cholesterol: 180,
            blood_sugar: 90,
            bmi: 22.0,
            smoking: "No",
            alcohol: "No",
            physical_activity: "High",
        }
    }

    #[test]
    fn test_all_thresholds_met_scores_seven_high_risk() {
        let inputs = RiskInputs {
            bp: 150,
            cholesterol: 250,
            blood_sugar: 130,
            bmi: 32.0,
            smoking: "Regularly",
            alcohol: "Frequently",
            physical_activity: "Low",
        };
        assert_eq!(score(&inputs), (7, HIGH_RISK));
    }

    #[test]
    fn test_no_thresholds_met_scores_zero_low_risk() {
        assert_eq!(score(&baseline()), (0, LOW_RISK));
    }

    #[test]
    fn test_boundary_two_conditions_is_low_three_is_high() {
        let mut inputs = baseline();
        inputs.bp = 141;
        inputs.cholesterol = 241;
        assert_eq!(score(&inputs), (2, LOW_RISK));

        inputs.blood_sugar = 121;
        assert_eq!(score(&inputs), (3, HIGH_RISK));
    }

    #[test]
    fn test_threshold_values_themselves_do_not_score() {
        // Conditions are strict inequalities
        let inputs = RiskInputs {
            bp: 140,
            cholesterol: 240,
            blood_sugar: 120,
            bmi: 30.0,
            ..baseline()
        };
        assert_eq!(risk_points(&inputs), 0);
    }

    #[test]
    fn test_lifestyle_levels_only_score_exact_categories() {
        let mut inputs = baseline();
        inputs.smoking = "Occasionally";
        inputs.alcohol = "Occasionally";
        inputs.physical_activity = "Moderate";
        assert_eq!(risk_points(&inputs), 0);

        inputs.smoking = "Regularly";
        inputs.alcohol = "Frequently";
        inputs.physical_activity = "Low";
        assert_eq!(risk_points(&inputs), 3);
    }

    #[test]
    fn test_label_depends_only_on_count() {
        // Any three conditions produce High Risk, regardless of which
        let mut inputs = baseline();
        inputs.bmi = 31.0;
        inputs.smoking = "Regularly";
        inputs.physical_activity = "Low";
        assert_eq!(classify(risk_points(&inputs)), HIGH_RISK);
    }
}
