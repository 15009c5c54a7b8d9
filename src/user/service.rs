use crate::database::DB_NAME;
use crate::middleware::auth::create_token;
use crate::user::model::{User, UserResponse};
use crate::utils::error::CustomError;
use crate::utils::hashing;
use crate::utils::model::LoginRequest;
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

pub struct UserService {
    collection: Collection<User>,
}

impl UserService {
    pub fn new(client: &Client) -> Self {
        let collection = client.database(DB_NAME).collection::<User>("users");
        UserService { collection }
    }

    /// Create the unique indexes the `users` collection relies on.
    pub async fn ensure_indexes(&self) -> Result<(), CustomError> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_indexes([username_index, email_index])
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        Ok(())
    }

    pub async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
        role: String,
    ) -> Result<ObjectId, CustomError> {
        let hashed_password = hashing::hash_password(&password)
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        let new_user = User {
            id: None,
            username,
            email,
            password: hashed_password,
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // A duplicate username or email hits the unique index and surfaces as a
        // plain write error, not a distinct status.
        let result = self
            .collection
            .insert_one(new_user)
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            CustomError::InternalServerError("Failed to get inserted ID".to_string())
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CustomError> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|_| CustomError::InternalServerError("Database error".to_string()))
    }

    /// Look the user up by email and check the password hash. Both an unknown
    /// email and a mismatch produce the same 400 response.
    pub async fn authenticate_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, CustomError> {
        let user = self.find_by_email(email).await?.ok_or_else(|| {
            CustomError::BadRequestError("Invalid email or password".to_string())
        })?;

        if !hashing::verify_password(password, &user.password)
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?
        {
            return Err(CustomError::BadRequestError(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn login(
        &self,
        login_data: LoginRequest,
    ) -> Result<(String, UserResponse), CustomError> {
        let user = self
            .authenticate_user(&login_data.email, &login_data.password)
            .await?;

        let user_id = user
            .id
            .as_ref()
            .ok_or_else(|| CustomError::InternalServerError("User ID missing".to_string()))?;

        let token = create_token(&user_id.to_hex(), &user.role)?;

        Ok((token, UserResponse::from(&user)))
    }
}
