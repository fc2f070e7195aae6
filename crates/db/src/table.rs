use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    UserId,
    Name,
    CookTime,
    BaseServings,
    IsOfficial,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Tag {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone)]
pub enum RecipeTag {
    Table,
    RecipeId,
    TagId,
}

#[derive(Iden, Clone)]
pub enum RecipeRating {
    Table,
    RecipeId,
    UserId,
    Score,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Moment {
    Table,
    Id,
    Name,
    Position,
}

#[derive(Iden, Clone)]
pub enum PlannedMeal {
    Table,
    Id,
    UserId,
    Day,
    MomentId,
    RecipeId,
}
