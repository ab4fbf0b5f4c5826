//! Short reference texts shown in the knowledge panel.

pub struct Topic {
    pub title: &'static str,
    pub body: &'static str,
}

pub const TOPICS: [Topic; 4] = [
    Topic {
        title: "What is linear regression?",
        body: "Linear regression models how a response y changes with a predictor x \
using a straight line y = a·x + b. The slope a is the expected change in y per unit \
of x; the intercept b is the value of the line at x = 0.\n\n\
Galton noticed that children of very tall or very short parents tend to be closer \
to the average height than their parents. A fitted slope below 1 is exactly this \
\"regression toward the mean\".",
    },
    Topic {
        title: "Ordinary least squares",
        body: "OLS picks the line that minimises the sum of squared residuals \
SSE = Σ(yᵢ − ŷᵢ)². Squaring penalises large misses and gives a unique closed-form \
answer as long as the x values are not all identical.\n\n\
Press `a` to jump to the OLS line and compare its MSE with your own attempts. \
No other line has a lower MSE on this data.",
    },
    Topic {
        title: "Deriving the OLS formulas",
        body: "Set the partial derivatives of SSE with respect to a and b to zero:\n\n\
  ∂SSE/∂b = −2 Σ(yᵢ − a·xᵢ − b) = 0\n\
  ∂SSE/∂a = −2 Σ xᵢ(yᵢ − a·xᵢ − b) = 0\n\n\
Solving the two normal equations gives\n\n\
  a = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)\n\
  b = ȳ − a·x̄\n\n\
so the OLS line always passes through the point of means (x̄, ȳ).",
    },
    Topic {
        title: "Correlation is not causation",
        body: "Pearson's r measures how tightly the points follow a straight line, \
from −1 to 1, and does not depend on the line you draw. R² measures how much of the \
variance in y your line explains; at the OLS fit R² = r².\n\n\
A strong correlation alone does not show that x causes y. Parent and child heights \
share genes, nutrition and environment; the regression line describes the \
association, not the mechanism.",
    },
];
