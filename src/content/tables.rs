use super::{CarbQuestion, FoodChoice, FoodPair, Scenario, ScenarioChoice};

pub const HEALTHY_FOODS: [&str; 7] = ["🍎", "🥦", "🥕", "🍓", "🍇", "🍗", "🥛"];
pub const UNHEALTHY_FOODS: [&str; 7] = ["🍬", "🍭", "🍩", "🥤", "🍕", "🍟", "🍫"];

const fn food(emoji: &'static str, name: &'static str, healthy: bool) -> FoodChoice {
    FoodChoice {
        emoji,
        name,
        healthy,
    }
}

const fn pair(id: u32, healthy: FoodChoice, other: FoodChoice) -> FoodPair {
    FoodPair {
        id,
        options: [healthy, other],
    }
}

pub const FOOD_PAIRS: [FoodPair; 8] = [
    pair(1, food("🍎", "Apple", true), food("🍩", "Doughnut", false)),
    pair(2, food("🥦", "Broccoli", true), food("🍟", "French fries", false)),
    pair(3, food("💧", "Water", true), food("🥤", "Fizzy drink", false)),
    pair(4, food("🥕", "Carrot", true), food("🍫", "Chocolate", false)),
    pair(5, food("🥖", "Brown bread", true), food("🍞", "White bread", false)),
    pair(6, food("🍇", "Grapes", true), food("🍬", "Candy", false)),
    pair(7, food("🍗", "Grilled chicken", true), food("🌭", "Sausage", false)),
    pair(8, food("🥛", "Milk", true), food("🧃", "Boxed juice", false)),
];

pub const CARB_QUESTIONS: [CarbQuestion; 7] = [
    CarbQuestion {
        name: "Medium apple",
        icon: "🍎",
        options: [5, 15, 30],
        correct_answer: 15,
        explanation: "A medium apple usually contains about 15 grams of carbohydrate.",
    },
    CarbQuestion {
        name: "Slice of white bread",
        icon: "🍞",
        options: [15, 25, 40],
        correct_answer: 15,
        explanation: "One slice of white bread contains roughly 15 grams of carbohydrate.",
    },
    CarbQuestion {
        name: "Cup of milk (240 ml)",
        icon: "🥛",
        options: [12, 20, 35],
        correct_answer: 12,
        explanation: "One cup of milk usually contains about 12 grams of carbohydrate.",
    },
    CarbQuestion {
        name: "Small banana",
        icon: "🍌",
        options: [10, 20, 30],
        correct_answer: 20,
        explanation: "A small banana contains about 20 grams of carbohydrate.",
    },
    CarbQuestion {
        name: "Half a cup of cooked rice",
        icon: "🍚",
        options: [10, 22, 45],
        correct_answer: 22,
        explanation: "Half a cup of cooked rice contains roughly 22 grams of carbohydrate.",
    },
    CarbQuestion {
        name: "Small box of raisins",
        icon: "🍇",
        options: [15, 30, 50],
        correct_answer: 15,
        explanation: "A small box of raisins (about 30 g) contains 15 grams of carbohydrate.",
    },
    CarbQuestion {
        name: "Half a cup of cooked pasta",
        icon: "🍝",
        options: [10, 20, 40],
        correct_answer: 20,
        explanation: "Half a cup of cooked pasta contains about 20 grams of carbohydrate.",
    },
];

pub const SCENARIOS: [Scenario; 3] = [
    Scenario {
        title: "The awkward moment",
        icon: "😳",
        text: "You are in an important work meeting. Suddenly you feel very thirsty and \
               your vision blurs. You remember you skipped your insulin dose before lunch. \
               What do you do?",
        choices: [
            ScenarioChoice {
                text: "Ignore it and hold on until the meeting ends.",
                correct: false,
                feedback: "That can be dangerous! Ignoring very high blood sugar can lead to \
                           complications. Your health always comes first.",
            },
            ScenarioChoice {
                text: "Excuse myself quietly, check my sugar, take a dose, then come back.",
                correct: true,
                feedback: "Wise move! Handling it calmly and putting your health first is the \
                           right and responsible thing to do.",
            },
            ScenarioChoice {
                text: "Leave the meeting at once without explaining.",
                correct: false,
                feedback: "It may fix the health problem for now, but it can look \
                           unprofessional. It is always better to excuse yourself first.",
            },
        ],
    },
    Scenario {
        title: "Restaurant dilemma",
        icon: "🍽️",
        text: "You are at a restaurant with friends. Everyone orders carb-heavy dishes and \
               desserts. You feel pressure to join in, but you know it will upset your \
               blood sugar. What do you do?",
        choices: [
            ScenarioChoice {
                text: "Order the same as them; I don't want to stand out.",
                correct: false,
                feedback: "It may feel awkward, but your health matters more. Ordering what \
                           suits you is a sign of strength and awareness.",
            },
            ScenarioChoice {
                text: "Look for a healthy option on the menu and order it confidently.",
                correct: true,
                feedback: "Excellent! Your choice shows control and understanding. You can \
                           enjoy your time and still look after your health.",
            },
            ScenarioChoice {
                text: "Make up an excuse and say I'm not hungry.",
                correct: false,
                feedback: "Avoiding the situation is not a solution. It is important to learn \
                           to handle these social moments with confidence.",
            },
        ],
    },
    Scenario {
        title: "Low during exercise",
        icon: "🏃",
        text: "You are in the middle of a good workout. Suddenly you start shaking, break \
               into a cold sweat and feel confused: signs of low blood sugar. What do you do?",
        choices: [
            ScenarioChoice {
                text: "Ignore it and finish the workout; I don't want to waste the effort.",
                correct: false,
                feedback: "Very dangerous! Exercising through a low can make you pass out. \
                           Stop immediately.",
            },
            ScenarioChoice {
                text: "Stop at once, take fast sugar (like dates) and rest.",
                correct: true,
                feedback: "Perfect! You listened to your body and acted quickly and safely. \
                           That is the right way to treat a low.",
            },
            ScenarioChoice {
                text: "Slow down and wait for the feeling to pass.",
                correct: false,
                feedback: "That may not be enough. A low needs immediate treatment with fast \
                           sugar, not just less effort.",
            },
        ],
    },
];
